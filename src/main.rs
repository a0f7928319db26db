//! Maintenance CLI for the pet database.
//!
//! Operates directly on `DATABASE_URL`; the HTTP API lives in `src/bin/api_server.rs`.

use pet_shelter::infra::{config, telemetry};
use pet_shelter::PetProvider;

fn usage_and_exit() -> ! {
    eprintln!(
        "Usage: pet-shelter <command>\n\
         \n\
         Commands:\n\
           list                 Print every pet\n\
           insert-dummy         Insert a placeholder pet\n\
           delete <uri>         Delete one pet by its content:// address\n\
           delete-all --yes     Delete every pet\n\
         \n\
         Env vars:\n\
           DATABASE_URL (default sqlite://shelter.db)\n"
    );
    std::process::exit(2);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    telemetry::init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args.iter().any(|a| a == "-h" || a == "--help") {
        usage_and_exit();
    }

    let provider = PetProvider::connect(&config::database_url()).await?;

    match args[0].as_str() {
        "list" => {
            let pets = provider.list().await?;
            if pets.is_empty() {
                println!("No pets yet.");
            }
            for pet in pets {
                println!("{}", serde_json::to_string(&pet)?);
            }
        }
        "insert-dummy" => {
            let address = provider.insert_dummy_pet().await?;
            println!("Inserted {}", address);
        }
        "delete" => {
            let Some(uri) = args.get(1) else {
                usage_and_exit();
            };
            let address = provider.resolve(uri)?;
            let rows = provider.delete_pet(address).await?;
            if rows == 0 {
                anyhow::bail!("No pet at {}", address);
            }
            println!("Deleted {}", address);
        }
        "delete-all" => {
            if !args.iter().any(|a| a == "--yes") {
                anyhow::bail!("Refusing to delete all pets without --yes");
            }
            let rows = provider.delete_all_pets().await?;
            println!("Deleted {} pet(s)", rows);
        }
        _ => usage_and_exit(),
    }

    Ok(())
}
