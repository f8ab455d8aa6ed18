use std::sync::Arc;

use rookline::prelude::*;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,rookline=debug";

/// One seeded game and the tokens that can play it.
struct Seeded {
    game_id: GameId,
    white_token: String,
    black_token: String,
    observer_token: String,
}

/// Creates a game with alice as White and bob as Black, and issues a
/// token for each plus one for carol, who can only watch.
async fn seed(
    store: &MemoryGameStore,
    identity: &MemoryIdentityProvider,
) -> Result<Seeded, RookError> {
    let game_id = store.create_game("demo").await;
    store
        .join_game(game_id, Color::White, Username::new("alice"))
        .await?;
    store
        .join_game(game_id, Color::Black, Username::new("bob"))
        .await?;

    Ok(Seeded {
        game_id,
        white_token: identity.issue(Username::new("alice")).await,
        black_token: identity.issue(Username::new("bob")).await,
        observer_token: identity.issue(Username::new("carol")).await,
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER)),
        )
        .init();

    let bind_addr = std::env::var("ROOKLINE_ADDR")
        .unwrap_or_else(|_| ServerConfig::default().bind_addr);

    let store = Arc::new(MemoryGameStore::new());
    let identity = Arc::new(MemoryIdentityProvider::new());
    let seeded = seed(&store, &identity).await?;
    tracing::info!(
        game_id = %seeded.game_id,
        white = %seeded.white_token,
        black = %seeded.black_token,
        observer = %seeded.observer_token,
        "seeded demo game"
    );

    let server = RookServerBuilder::new()
        .bind(&bind_addr)
        .build(store, identity)
        .await?;
    tracing::info!(addr = %server.local_addr()?, "starting chess server");

    server.run().await?;
    Ok(())
}
