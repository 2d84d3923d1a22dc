mod cli;
mod log;
mod prompt;
mod render;

use std::thread;

use client::{config, Api, GameClient, HttpApi};
use common::event::client::{FormField, NewGameRequest};
use tokio::{
    select,
    sync::{mpsc, watch},
    task,
};
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

async fn play(config: config::Config) -> anyhow::Result<()> {
    let api = HttpApi::new(&config)?;
    info!(server = %config.server_url, "joining game");

    let token = CancellationToken::new();
    let (commands, command_rx) = mpsc::channel(8);
    let (views, view_rx) = watch::channel(None);

    let client_task = {
        let token = token.child_token();
        let client = GameClient::new(api, &config);

        task::spawn(async move {
            let mut terminal = render::Terminal::new(views);
            client.start(&mut terminal, command_rx, token).await;
        })
    };

    // stdin reads never finish on their own, so they get a plain thread
    // the runtime does not wait for
    thread::spawn(move || {
        if let Err(e) = prompt::run(commands, view_rx) {
            error!("prompt error: {e}");
        }
    });

    tokio::pin!(client_task);

    let shutdown = tokio::signal::ctrl_c();

    select! {
        Ok(_) = shutdown => {
            info!("shutdown signal received");
            token.cancel();
            if let Err(e) = client_task.await {
                error!("client task error: {e}");
            }
        }
        res = &mut client_task => {
            if let Err(e) = res {
                error!("client task error: {e}");
            }
        }
        else => {}
    }

    Ok(())
}

async fn new_game(config: config::Config, fields: Vec<FormField>) -> anyhow::Result<()> {
    let api = HttpApi::new(&config)?;

    let response = api.start_new_game(&NewGameRequest { fields }).await?;
    info!(?response, "new game response");

    if !response.startnewgame {
        anyhow::bail!(
            "server refused to start a game: {}",
            response.message.as_deref().unwrap_or("no reason given")
        );
    }

    match response.new_game_id {
        Some(id) => println!("started game {id}"),
        None => println!("started a new game"),
    }
    if let Some(message) = response.message {
        println!("{message}");
    }

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    log::init()?;

    let args = cli::parse_args()?;

    let mut config = config::load_or_default();
    args.overrides.apply(&mut config);

    match args.command {
        cli::Command::Play => play(config).await?,
        cli::Command::NewGame(fields) => new_game(config, fields).await?,
    }

    Ok(())
}
