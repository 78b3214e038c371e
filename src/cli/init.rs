//! `fluxgen init`: scaffold a starter config file.

use clap::Args;
use console::style;

use crate::cli::run_cli_async;

const TOML_TEMPLATE: &str = r#"# fluxgen configuration

[[jobs]]
# Path or URL of the OpenAPI document
input = "./openapi.json"
# Directory the generated modules are written under
output = "./src/api"
# Your fetch transport implementation
fetchClient = "./src/lib/fetch-client"
# Optional: your API error class, used as the Result error type
# apiError = "./src/lib/api-error"
# "plain" or "schema-validated"
typeStyle = "plain"
# "result" or "throw"
transport = "result"
# Any of: "swr", "react-query"
hooks = []
"#;

const JSON_TEMPLATE: &str = r#"{
  "jobs": [
    {
      "input": "./openapi.json",
      "output": "./src/api",
      "fetchClient": "./src/lib/fetch-client",
      "typeStyle": "plain",
      "transport": "result",
      "hooks": []
    }
  ]
}
"#;

#[derive(Args, Debug, Clone)]
pub struct InitArgs {
    #[arg(long, help = "Scaffold a JSON config file instead of TOML")]
    pub json: bool,
}

pub async fn run(args: InitArgs) -> i32 {
    run_cli_async(|| async move {
        let (file_name, template) = if args.json {
            ("fluxgen.config.json", JSON_TEMPLATE)
        } else {
            ("fluxgen.config.toml", TOML_TEMPLATE)
        };

        let cwd = std::env::current_dir()
            .map_err(|err| format!("Failed to resolve working directory: {err}"))?;
        let path = cwd.join(file_name);
        if path.exists() {
            return Err(format!("{file_name} already exists"));
        }

        std::fs::write(&path, template)
            .map_err(|err| format!("Failed to write {file_name}: {err}"))?;
        println!("{} Created {file_name}", style("✓").green());
        Ok(())
    })
    .await
}
