//! Agent status command

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, HealthResponse, ReadinessResponse};
use crate::output::{color_status, print_error, OutputFormat};

/// Row for the component health table
#[derive(Tabled)]
struct ComponentRow {
    #[tabled(rename = "Component")]
    component: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Show agent health and readiness
pub async fn show_status(client: &ApiClient, format: OutputFormat) -> Result<()> {
    let health: HealthResponse = match client.get("healthz").await {
        Ok(health) => health,
        Err(err) => {
            print_error(&format!("Agent unreachable or unhealthy: {}", err));
            return Err(err);
        }
    };
    let readiness: ReadinessResponse = client.get("readyz").await.unwrap_or(ReadinessResponse {
        ready: false,
        reason: Some("readiness probe failed".to_string()),
    });

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&serde_json::json!({
                "health": health,
                "readiness": readiness,
            }))?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("Overall: {}", color_status(&health.status));
            println!(
                "Ready: {}",
                if readiness.ready {
                    "yes".to_string()
                } else {
                    format!("no ({})", readiness.reason.unwrap_or_default())
                }
            );

            let mut rows: Vec<ComponentRow> = health
                .components
                .iter()
                .map(|(name, component)| ComponentRow {
                    component: name.clone(),
                    status: color_status(&component.status),
                    message: component.message.clone().unwrap_or_default(),
                })
                .collect();
            rows.sort_by(|a, b| a.component.cmp(&b.component));

            if !rows.is_empty() {
                let table = tabled::Table::new(rows)
                    .with(tabled::settings::Style::rounded())
                    .to_string();
                println!("{}", table);
            }
        }
    }

    Ok(())
}
