//! Notification text and dispatch commands

use anyhow::Result;
use tabled::Tabled;

use crate::client::{ApiClient, DispatchReceipt, DispatchRequest, LogResponse, SignResponse, SocialResponse};
use crate::commands::schedule::query_path;
use crate::output::{color_status, print_info, print_success, print_warning, OutputFormat};

/// Row for the communication log table
#[derive(Tabled)]
struct LogRow {
    #[tabled(rename = "Time")]
    time: String,
    #[tabled(rename = "Channel")]
    channel: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Message")]
    message: String,
}

/// Show the social-post text for a date
pub async fn show_social(
    client: &ApiClient,
    date: Option<String>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let path = query_path("api/v1/notify/social", date.as_deref(), seed);
    let response: SocialResponse = client.get(&path).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", response.text);
            println!();
            print_info(&format!("Post link: {}", response.intent_url));
        }
    }

    Ok(())
}

/// Show the roadway-sign text for a date
pub async fn show_sign(
    client: &ApiClient,
    date: Option<String>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let path = query_path("api/v1/notify/sign", date.as_deref(), seed);
    let response: SignResponse = client.get(&path).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            println!("{}", response.text);
        }
    }

    Ok(())
}

/// Push the sign text to the VMS network
pub async fn dispatch_vms(
    client: &ApiClient,
    date: Option<String>,
    seed: Option<u64>,
    format: OutputFormat,
) -> Result<()> {
    let request = DispatchRequest { date, seed };
    let receipt: DispatchReceipt = client.post("api/v1/dispatch/vms", &request).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&receipt)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            print_success(&format!(
                "Sent to {} signs at {}",
                receipt.signs_reached, receipt.sent_at
            ));
            println!("Message: {}", receipt.message_preview);
        }
    }

    Ok(())
}

/// Show the recent communication log
pub async fn show_log(client: &ApiClient, limit: usize, format: OutputFormat) -> Result<()> {
    let path = format!("api/v1/dispatch/log?limit={}", limit);
    let response: LogResponse = client.get(&path).await?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&response.entries)?;
            println!("{}", json);
        }
        OutputFormat::Table => {
            if response.entries.is_empty() {
                print_warning("No dispatches recorded");
                return Ok(());
            }

            let rows: Vec<LogRow> = response
                .entries
                .iter()
                .map(|e| LogRow {
                    time: e.time.clone(),
                    channel: e.channel.clone(),
                    status: color_status(&e.status),
                    message: e.message.clone(),
                })
                .collect();

            let table = tabled::Table::new(rows)
                .with(tabled::settings::Style::rounded())
                .to_string();
            println!("{}", table);
        }
    }

    Ok(())
}
