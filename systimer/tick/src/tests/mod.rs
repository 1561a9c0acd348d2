mod bank;
mod hal;
