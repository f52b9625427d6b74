use domo::DomoRecord;

#[derive(DomoRecord)]
pub struct Pair(pub i64, pub String);

fn main() {}
