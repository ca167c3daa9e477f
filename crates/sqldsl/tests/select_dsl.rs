//! End-to-end checks of the query DSL through the public API.

use sqldsl::prelude::*;

fn build(init: impl FnOnce(&mut SelectBuilder) -> DslResult<()>) -> DslResult<String> {
    query(init)?.build()
}

#[test]
fn nested_or_inside_root_and() {
    let sql = build(|q| {
        q.select(["*"])?;
        q.from("table1");
        q.where_clause(|c| {
            c.or(|c| {
                c.eq("c", "x")?;
                c.eq("d", 4)?;
                Ok(())
            })?;
            c.eq("e", "5")?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();
    assert_eq!(sql, "SELECT * FROM table1 WHERE ((c = 'x' or d = 4) and e = '5');");
}

#[test]
fn bare_from_selects_everything() {
    let sql = build(|q| {
        q.from("t");
        Ok(())
    })
    .unwrap();
    assert_eq!(sql, "SELECT * FROM t;");
}

#[test]
fn select_without_names_fails() {
    let err = build(|q| {
        q.select(Vec::<String>::new())?;
        q.from("t");
        Ok(())
    })
    .unwrap_err();
    assert_eq!(err, DslError::EmptyColumnList);
}

#[test]
fn where_null_value() {
    let sql = build(|q| {
        q.from("t");
        q.where_clause(|c| {
            c.eq("a", Value::Null)?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();
    assert_eq!(sql, "SELECT * FROM t WHERE a is null;");
}

#[test]
fn missing_table_is_reported() {
    let err = build(|q| {
        q.select(["a", "b"])?;
        Ok(())
    })
    .unwrap_err();
    assert_eq!(err, DslError::MissingTable);
}

#[test]
fn deep_single_child_chain_has_no_parens() {
    let sql = build(|q| {
        q.from("t");
        q.where_clause(|c| {
            c.and(|c| {
                c.or(|c| {
                    c.and(|c| {
                        c.eq("a", 1)?;
                        Ok(())
                    })?;
                    Ok(())
                })?;
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();
    assert_eq!(sql, "SELECT * FROM t WHERE a = 1;");
}

#[test]
fn n_children_use_n_minus_one_operators() {
    let names = ["a", "b", "c", "d", "e"];
    let sql = build(|q| {
        q.from("t");
        q.where_clause(|c| {
            c.or(|c| {
                for (i, name) in names.iter().enumerate() {
                    c.eq(*name, i as i64)?;
                }
                Ok(())
            })?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();
    assert_eq!(
        sql,
        "SELECT * FROM t WHERE (a = 0 or b = 1 or c = 2 or d = 3 or e = 4);"
    );
    assert_eq!(sql.matches(" or ").count(), names.len() - 1);
    assert_eq!(sql.matches('(').count(), 1);
}

#[test]
fn json_values_are_checked() {
    let input = serde_json::json!({ "name": "bob", "age": 30, "admin": true });

    let err = build(|q| {
        q.from("people");
        q.where_clause(|c| {
            c.eq("name", input["name"].clone())?;
            c.eq("age", input["age"].clone())?;
            c.eq("admin", input["admin"].clone())?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap_err();
    assert_eq!(err, DslError::InvalidValueType("boolean true".into()));

    let sql = build(|q| {
        q.from("people");
        q.where_clause(|c| {
            c.eq("name", input["name"].clone())?;
            c.eq("age", input["age"].clone())?;
            Ok(())
        })?;
        Ok(())
    })
    .unwrap();
    assert_eq!(sql, "SELECT * FROM people WHERE (name = 'bob' and age = 30);");
}

#[test]
fn condition_built_standalone_rejects_children_on_leaf() {
    let mut leaf = Condition::leaf("a", 1).unwrap();
    let err = leaf
        .or(|c| {
            c.eq("b", 2)?;
            Ok(())
        })
        .unwrap_err();
    assert!(err.is_nested_on_leaf());
}

#[test]
fn builder_is_reusable_after_build() {
    let mut qb = query(|q| {
        q.select(["id"])?;
        q.from("a");
        Ok(())
    })
    .unwrap();
    assert_eq!(qb.build().unwrap(), "SELECT id FROM a;");

    qb.from("b");
    assert_eq!(qb.build().unwrap(), "SELECT id FROM b;");
}
