//! Tag text must be a string literal.

use tagcheck::Structured;

#[derive(Structured)]
pub struct Limits {
    #[tag(validate = 3)]
    pub count: u32,
}

fn main() {}
