use client::{config::Config, poller::ChangeDetection};
use common::event::client::FormField;

#[derive(Debug, PartialEq, Eq)]
pub(crate) enum Command {
    Play,
    NewGame(Vec<FormField>),
}

/// Command line settings that win over `Client.toml`.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct Overrides {
    server: Option<String>,
    interval: Option<u64>,
    always_render: bool,
}

impl Overrides {
    pub(crate) fn apply(&self, config: &mut Config) {
        if let Some(server) = &self.server {
            config.server_url.clone_from(server);
        }
        if let Some(interval) = self.interval {
            config.poll_interval_ms = interval;
        }
        if self.always_render {
            config.change_detection = ChangeDetection::Always;
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub(crate) struct Args {
    pub command: Command,
    pub overrides: Overrides,
}

pub(crate) fn parse_args() -> anyhow::Result<Args> {
    parse(pico_args::Arguments::from_env())
}

fn parse(mut pargs: pico_args::Arguments) -> anyhow::Result<Args> {
    let subcommand = pargs.subcommand()?;

    let overrides = Overrides {
        server: pargs.opt_value_from_str("--server")?,
        interval: pargs.opt_value_from_str("--interval")?,
        always_render: pargs.contains("--always-render"),
    };

    let rest = pargs.finish();

    let command = match subcommand.as_deref() {
        Some("play") => {
            if !rest.is_empty() {
                anyhow::bail!("unexpected arguments: {rest:?}");
            }
            Command::Play
        }
        Some("new-game") => {
            let fields = rest
                .iter()
                .map(|arg| {
                    arg.to_str()
                        .ok_or_else(|| anyhow::anyhow!("form field is not valid unicode: {arg:?}"))?
                        .parse::<FormField>()
                        .map_err(anyhow::Error::msg)
                })
                .collect::<anyhow::Result<Vec<_>>>()?;
            Command::NewGame(fields)
        }
        _ => {
            anyhow::bail!("must supply either 'play' or 'new-game'")
        }
    };

    Ok(Args { command, overrides })
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    fn args(args: &[&str]) -> anyhow::Result<Args> {
        parse(pico_args::Arguments::from_vec(
            args.iter().map(OsString::from).collect(),
        ))
    }

    #[test]
    fn play_with_overrides() {
        let parsed = args(&["play", "--server", "http://cards:9000", "--interval", "250", "--always-render"])
            .unwrap();
        assert_eq!(parsed.command, Command::Play);

        let mut config = Config::default();
        parsed.overrides.apply(&mut config);
        assert_eq!(config.server_url, "http://cards:9000");
        assert_eq!(config.poll_interval_ms, 250);
        assert_eq!(config.change_detection, ChangeDetection::Always);
    }

    #[test]
    fn no_overrides_keep_config() {
        let parsed = args(&["play"]).unwrap();

        let mut config = Config::default();
        parsed.overrides.apply(&mut config);
        assert_eq!(config, Config::default());
    }

    #[test]
    fn new_game_fields() {
        let parsed = args(&["new-game", "numberOfPlayers=3", "name=friday"]).unwrap();

        let Command::NewGame(fields) = parsed.command else {
            panic!("expected new-game");
        };
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].name, "name");
        assert_eq!(fields[1].value, "friday");

        assert!(args(&["new-game", "players"]).is_err());
    }

    #[test]
    fn rejects_unknown() {
        assert!(args(&[]).is_err());
        assert!(args(&["serve"]).is_err());
        assert!(args(&["play", "extra"]).is_err());
        assert!(args(&["play", "--interval", "fast"]).is_err());
    }
}
