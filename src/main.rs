use comingsoon::{config::load_config, App, Result};

#[tokio::main]
async fn main() -> Result<()> {
    // We have a different logging mechanism for production
    #[cfg(not(debug_assertions))]
    {
        comingsoon::init_production_tracing();
    }
    #[cfg(debug_assertions)]
    {
        comingsoon::init_dbg_tracing();
    }

    let config = load_config()?;
    let app = App::build_from_config(config).await?;

    comingsoon::serve(app).await?;

    Ok(())
}
