use domo::DomoRecord;

#[derive(DomoRecord)]
pub struct Row {
    #[domo]
    pub id: i64,
}

fn main() {}
