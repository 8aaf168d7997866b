use std::env;
use std::sync::Arc;

use anyhow::{bail, Result};
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use messaging_cell::services::ConversationSync;
use scheduling_cell::models::AppointmentQuery;
use scheduling_cell::services::{AppointmentClient, DoctorDirectory, SlotFetcher};
use session_cell::models::LoginRequest;
use session_cell::services::{AuthService, SessionStore};
use shared_api::ApiClient;
use shared_config::ApiConfig;
use shared_models::TracingNotifier;

#[tokio::main]
async fn main() -> Result<()> {
    // Loading Env Vars
    dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env();
    if !config.is_configured() {
        bail!("TELECARE_API_BASE_URL must be set");
    }

    let api = Arc::new(ApiClient::new(&config));
    let sessions = Arc::new(SessionStore::new(&config));

    let args: Vec<String> = env::args().skip(1).collect();
    match args.first().map(String::as_str) {
        Some("login") => {
            let [_, email, password] = args.as_slice() else {
                bail!("usage: telecare-cli login <email> <password>");
            };
            let auth = AuthService::new(Arc::clone(&api), Arc::clone(&sessions));
            let session = auth
                .login(LoginRequest {
                    email: email.clone(),
                    password: password.clone(),
                })
                .await?;
            info!("Logged in as {} ({})", session.user_id, session.role);
        }
        Some("logout") => {
            AuthService::new(Arc::clone(&api), Arc::clone(&sessions)).logout();
        }
        Some("doctors") => {
            let token = sessions.require_token()?;
            let doctors = DoctorDirectory::new(api).list(&token).await?;
            for doctor in doctors {
                println!("{}  {}  ({})", doctor.id, doctor.full_name, doctor.specialty);
            }
        }
        Some("slots") => {
            let [_, doctor_id, date] = args.as_slice() else {
                bail!("usage: telecare-cli slots <doctorId> <YYYY-MM-DD>");
            };
            let token = sessions.require_token()?;
            let batch = SlotFetcher::new(api)
                .fetch(doctor_id, date.parse()?, &token)
                .await?;
            for slot in batch.slots {
                let marker = if slot.available { "open" } else { "taken" };
                println!("{}  {}", slot.time, marker);
            }
        }
        Some("appointments") => {
            let token = sessions.require_token()?;
            let appointments = AppointmentClient::new(api)
                .list(&AppointmentQuery::default(), &token)
                .await?;
            for appointment in appointments {
                println!(
                    "{}  {}  {}  {}",
                    appointment.id, appointment.appointment_date, appointment.mode,
                    appointment.status
                );
            }
        }
        Some("conversations") => {
            let sync = ConversationSync::new(api, Arc::clone(&sessions), Arc::new(TracingNotifier));
            for conversation in sync.list_conversations().await? {
                println!(
                    "{}  {}  unread: {}",
                    conversation.id, conversation.participant.name, conversation.unread_count
                );
            }
        }
        _ => {
            eprintln!(
                "usage: telecare-cli <login|logout|doctors|slots|appointments|conversations> [...]"
            );
        }
    }

    Ok(())
}
