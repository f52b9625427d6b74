use domo::DomoRecord;

#[derive(DomoRecord)]
pub enum Region {
    North,
    South,
}

fn main() {}
