use domo::DomoRecord;

#[derive(DomoRecord)]
pub struct Row {
    #[domo("id")]
    #[domo("key")]
    pub id: i64,
}

fn main() {}
