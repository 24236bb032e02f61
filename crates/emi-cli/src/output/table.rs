use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render output as tables using the tabled crate.
///
/// Knows the shape of the schedule rows so year summaries, expanded years and
/// the month-wise ledger all come out with the calculator's column headers.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result(result, map);
            } else {
                print_field_value_table(value);
            }
        }
        Value::Array(arr) => print_object_array(arr),
        _ => println!("{}", value),
    }
}

fn print_result(result: &Value, envelope: &serde_json::Map<String, Value>) {
    match result.get("schedule").and_then(Value::as_array) {
        Some(rows) => {
            // Headline figures first, then the schedule itself.
            let Some(result_map) = result.as_object() else {
                return;
            };
            let scalars = Value::Object(
                result_map
                    .iter()
                    .filter(|(key, _)| key.as_str() != "schedule")
                    .map(|(key, val)| (key.clone(), val.clone()))
                    .collect(),
            );
            print_field_value_table(&scalars);
            println!();
            print_schedule(rows);
        }
        None => print_field_value_table(result),
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(methodology)) = envelope.get("methodology") {
        println!("\nMethodology: {}", methodology);
    }
}

fn print_schedule(rows: &[Value]) {
    if rows.is_empty() {
        println!("(empty schedule)");
        return;
    }

    let month_wise = rows[0].get("month").is_some();
    let expanded = rows[0].get("months").is_some();

    if month_wise {
        print_month_rows(rows);
        return;
    }

    print_year_rows(rows);

    if expanded {
        for year in rows {
            let label = year.get("year").map(cell_text).unwrap_or_default();
            if let Some(months) = year.get("months").and_then(Value::as_array) {
                println!("\nYear {} months:", label);
                print_month_rows(months);
            }
        }
    }
}

fn print_year_rows(rows: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record([
        "Year",
        "Principal (A)",
        "Interest (B)",
        "Total Payment (A+B)",
        "Balance",
        "Paid To Date",
    ]);
    for row in rows {
        builder.push_record([
            cell(row, "year"),
            cell(row, "principal"),
            cell(row, "interest"),
            cell(row, "total"),
            cell(row, "balance"),
            percent_cell(row, "paid_percent"),
        ]);
    }
    println!("{}", Table::from(builder));
}

fn print_month_rows(rows: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record([
        "Month",
        "Year",
        "Principal (A)",
        "Interest (B)",
        "Total Payment (A+B)",
        "Balance",
        "Paid To Date",
    ]);
    for row in rows {
        builder.push_record([
            cell(row, "month"),
            cell(row, "year"),
            cell(row, "principal"),
            cell(row, "interest"),
            cell(row, "total"),
            cell(row, "balance"),
            percent_cell(row, "paid_percent"),
        ]);
    }
    println!("{}", Table::from(builder));
}

fn print_field_value_table(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &cell_text(val)]);
        }
        println!("{}", Table::from(builder));
    }
}

fn print_object_array(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(cell_text).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }
        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", cell_text(item));
        }
    }
}

fn cell(row: &Value, key: &str) -> String {
    row.get(key).map(cell_text).unwrap_or_default()
}

fn percent_cell(row: &Value, key: &str) -> String {
    let text = cell(row, key);
    if text.is_empty() {
        text
    } else {
        format!("{}%", text)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
