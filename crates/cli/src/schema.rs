use rubyscope_api::models::Definition;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let schema = schemars::schema_for!(Vec<Definition>);
    println!("{}", serde_json::to_string_pretty(&schema)?);
    Ok(())
}
