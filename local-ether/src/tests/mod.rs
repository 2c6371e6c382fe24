#![cfg(test)]


mod mac;
mod windows;
