//! A terminal War card game.
//!
//! The human seat draws by pressing Enter; bot opponents draw after a short
//! random delay. Cards come from the Deck of Cards API, or from an in-memory
//! deck with `--offline`.

use anyhow::{Context, Result};
use card_war::{
    BotController, DeckGateway, DeckProvider, GameController, GameError, HumanController,
    LocalDeckGateway, Player, PlayerController, ViewQueue, drain_view_events, run_session,
};
use cw_client::{
    api_client::DeckApiClient,
    config::{ClientConfig, ConfigOverrides},
    console::{ConsoleRenderer, forward_presses, prompt_when_armed},
};
use pico_args::Arguments;
use std::{io, sync::Arc, time::Duration};
use tokio_util::sync::CancellationToken;

const HELP: &str = "\
Play War against bots in the terminal

USAGE:
  cw_client [OPTIONS]

OPTIONS:
  --api-url    URL         Deck API base URL  [default: env DECK_API_URL or https://deckofcardsapi.com/api/deck]
  --rounds     N           Rounds per game  [default: env GAME_MAX_ROUNDS or 8]
  --points     N           Points per round won  [default: env GAME_POINTS_PER_ROUND or 1]
  --name       NAME        Your display name  [default: env PLAYER_NAME or Player]
  --bots       N           Number of bot opponents  [default: env GAME_BOT_COUNT or 1]
  --seed       N           Seed for bot delays and offline shuffles  [default: env BOT_SEED]

FLAGS:
  --auto                   Let a bot play your seat
  --offline                Use an in-memory deck instead of the API
  -h, --help               Print help information

ENVIRONMENT:
  DECK_API_TIMEOUT_SECS    HTTP request timeout  [default: 10]
  BOT_MIN_DELAY_MS         Shortest bot thinking time  [default: 1000]
  BOT_MAX_DELAY_MS         Longest bot thinking time  [default: 3000]
  RUST_LOG                 Log filter (e.g., info, card_war=debug)
";

/// Pause after each revealed round
const REVEAL_DELAY: Duration = Duration::from_millis(500);

struct Args {
    overrides: ConfigOverrides,
    auto: bool,
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let args = Args {
        overrides: ConfigOverrides {
            api_url: pargs.opt_value_from_str("--api-url")?,
            max_rounds: pargs.opt_value_from_str("--rounds")?,
            points_per_round: pargs.opt_value_from_str("--points")?,
            player_name: pargs.opt_value_from_str("--name")?,
            bot_count: pargs.opt_value_from_str("--bots")?,
            seed: pargs.opt_value_from_str("--seed")?,
        },
        auto: pargs.contains("--auto"),
        offline: pargs.contains("--offline"),
    };

    env_logger::builder().format_target(false).init();

    let config = ClientConfig::from_env(args.overrides.clone());
    config.validate().context("Invalid configuration")?;

    run(&args, &config).await
}

fn bot(config: &ClientConfig, seat: usize) -> Arc<dyn PlayerController> {
    let delay = config.bot_delay();
    match config.bots.seed {
        Some(seed) => Arc::new(BotController::with_seed(
            delay,
            seed.wrapping_add(seat as u64),
        )),
        None => Arc::new(BotController::new(delay)),
    }
}

async fn run(args: &Args, config: &ClientConfig) -> Result<()> {
    let cancel = CancellationToken::new();
    {
        let cancel = cancel.clone();
        ctrlc::set_handler(move || cancel.cancel()).context("Failed to set Ctrl-C handler")?;
    }

    let gateway: Arc<dyn DeckGateway> = if args.offline {
        log::info!("Playing offline with an in-memory deck");
        match config.bots.seed {
            Some(seed) => Arc::new(LocalDeckGateway::with_seed(seed)),
            None => Arc::new(LocalDeckGateway::new()),
        }
    } else {
        log::info!("Using deck API at {}", config.api.base_url);
        Arc::new(
            DeckApiClient::new(config.api.base_url.clone(), config.api_timeout())
                .context("Failed to create deck API client")?,
        )
    };

    // Seat 0 is the human, the rest are bots.
    let human = HumanController::new();
    let mut players = vec![Player::new("human", config.game.player_name.clone())];
    let mut controllers: Vec<Arc<dyn PlayerController>> = if args.auto {
        vec![bot(config, 0)]
    } else {
        vec![Arc::new(human.clone())]
    };
    for seat in 1..=config.game.bot_count {
        players.push(Player::new(format!("bot{seat}"), format!("Bot {seat}")));
        controllers.push(bot(config, seat));
    }

    let (view, events) = ViewQueue::new();
    let names: Vec<String> = players
        .iter()
        .map(|p| p.display_name().to_string())
        .collect();
    let renderer = tokio::spawn(async move {
        let mut console =
            ConsoleRenderer::new(names, io::stdout()).with_reveal_delay(REVEAL_DELAY);
        drain_view_events(events, &mut console).await
    });

    if !args.auto {
        tokio::spawn(prompt_when_armed(human.clone(), cancel.clone()));

        // Blocking stdin reads get their own thread so they never hold up
        // runtime shutdown.
        let human = human.clone();
        let cancel = cancel.clone();
        std::thread::spawn(move || forward_presses(io::stdin().lock(), &human, &cancel));
    }

    let mut game = GameController::new(
        DeckProvider::new(gateway),
        players,
        controllers,
        Arc::new(view),
        config.game_mode(),
    )?;

    let result = run_session(&mut game, &cancel).await;

    human.disable();
    cancel.cancel();
    // The view queue closes with the game, letting the renderer finish.
    drop(game);
    renderer.await.context("Renderer task failed")?;

    match result {
        Ok(_) => Ok(()),
        Err(GameError::Cancelled) => {
            println!("Game cancelled.");
            Ok(())
        }
        Err(e) => Err(e).context("Game aborted"),
    }
}
