use rubyscope_api::models::Definition;
use tabled::Tabled;

/// One row of a definition listing.
#[derive(Tabled)]
pub struct DefinitionRow {
    #[tabled(rename = "Kind")]
    pub kind: &'static str,
    #[tabled(rename = "Name")]
    pub name: String,
    #[tabled(rename = "Detail")]
    pub detail: String,
    #[tabled(rename = "Location")]
    pub location: String,
}

impl DefinitionRow {
    pub fn from_definition(definition: &Definition) -> Self {
        let location = definition
            .location()
            .map(|loc| {
                let file = loc.uri.rsplit('/').next().unwrap_or(&loc.uri);
                format!("{}:{}", file, loc.range.begin.line)
            })
            .unwrap_or_else(|| "-".to_string());

        Self {
            kind: definition.kind_name(),
            name: definition.qualified_name().into_owned(),
            detail: detail(definition),
            location,
        }
    }
}

fn detail(definition: &Definition) -> String {
    if let Some(method) = definition.as_method() {
        return method
            .types
            .iter()
            .map(|t| format!("{} -> {}", t.parameters_string, t.return_type))
            .collect::<Vec<_>>()
            .join(" | ");
    }
    if let Some(class) = definition.as_class() {
        if let Some(super_class) = &class.super_class_qualified_name {
            return format!("< {super_class}");
        }
    }
    "-".to_string()
}
