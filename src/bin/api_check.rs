use taskdeck::api::TaskService;
use taskdeck::api::http::ApiClient;
use taskdeck::api::keyring::KeyringAuth;
use taskdeck::config::{self, AppConfig};
use taskdeck::core::task::TaskFilter;
use taskdeck::shell::{AuthState, RootScreen};

#[tokio::main]
async fn main() {
    systemd_journal_logger::JournalLog::new()
        .unwrap()
        .with_syslog_identifier("taskdeck-check".to_string())
        .install()
        .unwrap();

    let config = config::load_config(&AppConfig::path());
    taskdeck::set_debug_logging(config.debug_logging);
    log::set_max_level(if taskdeck::debug_logging() {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    });

    println!("=== Backend Check: {} ===\n", config.backend_url);

    let auth = KeyringAuth::new(&config.backend_url);
    let state = AuthState::resolve(&auth).await;
    match state.root_screen() {
        RootScreen::Home => println!("Token found; app would open on the task list."),
        RootScreen::SignIn => println!("No token stored; app would open on the sign-in screen."),
    }

    let client = match ApiClient::new(
        &config.backend_url,
        state.token().cloned(),
        config.request_timeout(),
    ) {
        Ok(c) => c,
        Err(e) => {
            println!("  Client error: {}", e);
            return;
        }
    };

    match client.health().await {
        Ok(health) => println!("Health: {} at {}", health.status, health.timestamp),
        Err(e) => println!("Health: unreachable ({})", e),
    }

    if state.token().is_none() {
        println!("\nStore a token with:");
        println!(
            "  secret-tool store --label='Taskdeck' service taskdeck server {}",
            config.backend_url
        );
        return;
    }

    for &filter in TaskFilter::ALL {
        println!("\n--- {} ---", filter.label());
        match client.fetch_tasks(filter).await {
            Ok(tasks) => {
                println!("  {} tasks", tasks.len());
                for task in tasks.iter().take(3) {
                    println!(
                        "    [{}] {} (due {}, {:?})",
                        if task.is_completed { "x" } else { " " },
                        task.title,
                        task.due_label(),
                        task.urgency(),
                    );
                }
            }
            Err(e) => println!("  Error listing tasks: {}", e),
        }
    }

    println!("\n=== Done ===");
}
