use domo::DomoRecord;

#[derive(DomoRecord)]
#[domo("row")]
pub struct Row {
    pub id: i64,
}

fn main() {}
