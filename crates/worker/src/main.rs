use jobfeed::config::Config;
use jobfeed::db;
use jobfeed::ingest::run_ingest;
use jobfeed::refresh::run_refresh;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cfg = Config::from_env()?;

    println!(
        "jobfeed starting... job={} api_base={} page_limit={} page_offset={} country={} refresh_strategy={} search={} migrate_on_startup={}",
        cfg.job,
        cfg.api_base,
        cfg.page_limit,
        cfg.page_offset,
        cfg.country,
        cfg.refresh_strategy.as_str(),
        if cfg.search.is_some() { "enabled" } else { "disabled" },
        cfg.migrate_on_startup
    );

    let pool = db::make_pool(&cfg.database_url).await?;
    if cfg.migrate_on_startup {
        db::run_migrations(&pool).await?;
    }

    // One pass per invocation; the scheduler decides when to run us again.
    let trigger = serde_json::json!({});
    let outcome = match cfg.job.as_str() {
        "ingest" => run_ingest(&cfg, &pool, trigger).await,
        "refresh" => run_refresh(&cfg, &pool, trigger).await,
        other => {
            eprintln!("unknown JOBFEED_JOB '{other}' (expected: ingest, refresh)");
            std::process::exit(2);
        }
    };

    println!("[{}] status={} body={}", cfg.job, outcome.status_code, outcome.body);

    if outcome.is_failure() {
        std::process::exit(1);
    }

    Ok(())
}
