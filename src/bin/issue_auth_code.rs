//! CLI tool to issue (or look up) the auth code of a GitHub login.
//!
//! Usage:
//!   cargo run --bin issue-auth-code -- --login octocat

use std::env;

use nayduck_lib::config::Config;
use nayduck_lib::db::DbPool;
use nayduck_lib::services::auth_code;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let args: Vec<String> = env::args().collect();

    let mut login: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--login" | "-l" => {
                i += 1;
                login = args.get(i).cloned();
            }
            "--help" | "-h" => {
                print_usage();
                return;
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    let Some(login) = login else {
        eprintln!("Error: --login is required");
        print_usage();
        std::process::exit(1);
    };

    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }
    };

    let pool = match DbPool::new(&config).await {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Error connecting to database: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = pool.run_migrations().await {
        eprintln!("Error running migrations: {}", e);
        std::process::exit(1);
    }

    let code = match auth_code::get_auth_code(&pool, &login).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error issuing auth code: {}", e);
            std::process::exit(1);
        }
    };

    println!();
    println!("════════════════════════════════════════════════════════════════");
    println!("  NayDuck Auth Code");
    println!("════════════════════════════════════════════════════════════════");
    println!();
    println!("  Login:   {}", login.trim());
    println!("  Code:    {}", code);
    println!();
    println!("  Send it as: Authorization: nayduck {}", code);
    println!("════════════════════════════════════════════════════════════════");
    println!();
}

fn print_usage() {
    eprintln!();
    eprintln!("Usage: issue-auth-code --login <github-login>");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --login, -l   GitHub login to issue the code for (required)");
    eprintln!("  --help, -h    Show this help");
    eprintln!();
    eprintln!("Running it again for the same login prints the existing code.");
    eprintln!();
}
