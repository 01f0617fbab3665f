//! Enums cannot be described as records.

use tagcheck::Structured;

#[derive(Structured)]
enum Color {
    Red,
    Green,
}

fn main() {}
