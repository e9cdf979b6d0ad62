use prospect_core::catalog;

pub fn run(json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let rows = catalog();
    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    for row in rows {
        let rate = match row.rate {
            Some(rate) => format!("{rate}"),
            None => "disabled".to_string(),
        };
        println!("{:<10} {:<14} {:<6} {}", row.id, row.name, row.symbol, rate);
    }
    Ok(())
}
