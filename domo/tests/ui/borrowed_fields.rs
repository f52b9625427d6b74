use domo::DomoRecord;

#[derive(DomoRecord)]
pub struct Borrowed<'a> {
    pub name: &'a str,
}

fn main() {}
