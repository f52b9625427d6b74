use domo::DomoRecord;

#[derive(DomoRecord)]
pub struct Row {
    #[domo = 5]
    pub id: i64,
}

fn main() {}
