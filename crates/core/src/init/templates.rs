//! Embedded template files for `.crew-kit` initialization.

use rust_embed::RustEmbed;

/// Files from the workspace `templates/` directory, embedded at compile
/// time. With `debug-embed` they are still embedded in debug builds.
#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/../../templates"]
pub struct TemplateAssets;

/// Get template file content by path relative to the templates root.
///
/// # Example
/// ```
/// use ck_core::init::templates::get_template;
///
/// let config = get_template("config.toml").expect("config.toml should exist");
/// assert!(config.contains("process ="));
/// ```
pub fn get_template(path: &str) -> Option<String> {
    TemplateAssets::get(path).map(|file| String::from_utf8_lossy(file.data.as_ref()).to_string())
}

/// List all template files under `prefix` (e.g. `"agents/"`), sorted.
pub fn list_templates(prefix: &str) -> Vec<String> {
    let mut paths: Vec<String> = TemplateAssets::iter()
        .filter(|path| path.starts_with(prefix))
        .map(|path| path.to_string())
        .collect();
    paths.sort();
    paths
}

#[cfg(test)]
mod tests {
    use super::*;
    use ck_protocol::crew_models::CrewDefinition;
    use ck_protocol::GlobalConfig;

    #[test]
    fn test_config_template_parses() {
        let content = get_template("config.toml").expect("config.toml should be embedded");
        let config: GlobalConfig = toml::from_str(&content).expect("config.toml should parse");
        assert_eq!(config, GlobalConfig::default());
    }

    #[test]
    fn test_agent_templates() {
        let agents = list_templates("agents/");
        assert_eq!(agents.len(), 6);
        assert!(agents.contains(&"agents/researcher.md".to_string()));

        let researcher = get_template("agents/researcher.md").unwrap();
        assert!(researcher.contains("role: Researcher"));
        assert!(researcher.contains("web search"));
    }

    #[test]
    fn test_ml_assistant_crew_template() {
        let content = get_template("crews/ml-assistant.yaml").expect("crew should be embedded");
        let crew: CrewDefinition = serde_yaml::from_str(&content).expect("crew should parse");

        let names: Vec<_> = crew.tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "define-problem",
                "assess-data",
                "recommend-model",
                "research-docs",
                "generate-code",
                "reflect-on-code",
                "generate-v2-code",
                "explain-code",
            ]
        );
        assert_eq!(crew.tasks[2].context, vec!["define-problem", "assess-data"]);
        assert!(crew.tasks[1].description.contains("{data_preview}"));
    }

    #[test]
    fn test_get_nonexistent_template() {
        assert!(get_template("nonexistent.txt").is_none());
    }

    #[test]
    fn test_list_crew_templates() {
        assert_eq!(
            list_templates("crews/"),
            vec![
                "crews/define-problem.yaml".to_string(),
                "crews/ml-assistant.yaml".to_string(),
            ]
        );
    }
}
