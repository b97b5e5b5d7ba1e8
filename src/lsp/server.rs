use anyhow::Result;
use std::thread;
use std::time::Duration;
use tokio::io::{stdin, stdout};
use tower_lsp::{LspService, Server};

use crate::lsp::backend::Backend;
use crate::Config;

/// Start the LSP server
pub async fn serve() -> Result<()> {
    let config = Config::from_args_and_env()?;
    config.init_logging()?;

    let profile_registry = config.build_registry()?;
    log::info!(
        "Loaded profiles: {} (active: {})",
        profile_registry.list_profiles().join(", "),
        config.get_effective_profile()
    );

    // Integration tests read stdout to EOF, so exit shortly after startup
    if std::env::var("TAGBALANCE_LS_TEST_EXIT").as_deref() == Ok("1") {
        thread::spawn(|| {
            thread::sleep(Duration::from_secs(1));
            std::process::exit(0);
        });
    }

    let (service, socket) =
        LspService::build(move |client| Backend::new(client, config.clone(), profile_registry))
            .finish();

    Server::new(stdin(), stdout(), socket).serve(service).await;

    Ok(())
}
