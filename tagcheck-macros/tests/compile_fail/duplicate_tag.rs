//! A tag name may appear only once per field.

use tagcheck::Structured;

#[derive(Structured)]
pub struct Account {
    #[tag(validate = "required")]
    #[tag(validate = "email")]
    pub email: String,
}

fn main() {}
