use hrsim_core::{Catalog, EmployeeRecord};
use schemars::schema_for;

fn main() {
    let record = schema_for!(EmployeeRecord);
    let catalog = schema_for!(Catalog);
    let json = serde_json::json!({
        "employee_record": record,
        "catalog": catalog,
    });
    let json = serde_json::to_string_pretty(&json).expect("serialize json schema");
    println!("{json}");
}
