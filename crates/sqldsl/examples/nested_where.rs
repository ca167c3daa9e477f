//! Builds a SELECT with an OR group nested in the root AND group and prints it.
//!
//! Run with: `cargo run -p sqldsl --example nested_where`

use sqldsl::{DslResult, query};

fn main() -> DslResult<()> {
    let sql = query(|q| {
        q.select(["*"])?;
        q.from("table1");
        q.where_clause(|c| {
            c.or(|c| {
                c.eq("column6", "Test")?;
                c.eq("column4", 4)?;
                Ok(())
            })?;
            c.eq("column5", "5")?;
            Ok(())
        })?;
        Ok(())
    })?
    .build()?;

    println!("{sql}");
    Ok(())
}
