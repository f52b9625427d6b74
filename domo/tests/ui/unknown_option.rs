use domo::DomoRecord;

#[derive(DomoRecord)]
pub struct Row {
    #[domo(flatten)]
    pub id: i64,
}

fn main() {}
