//! `tradedesk-cli`: operator command line over the ERP and supplier portal.
//!
//! Every record module is reachable as `tradedesk <module> <action>`; the
//! commands drive the same view-models a screen would, so filtering, paging,
//! selection and notices behave identically.

pub mod account;
pub mod commands;
pub mod config;
pub mod modules;
pub mod output;
pub mod report;

use anyhow::{bail, Result};

use tradedesk_client::ApiClient;

use crate::commands::{Cli, Command};
use crate::config::AppConfig;

/// What every command needs: the API client and output preferences.
#[derive(Debug, Clone)]
pub struct Context {
    pub client: ApiClient,
    pub page_size: usize,
    pub json: bool,
}

impl Context {
    pub fn new(config: &AppConfig, json: bool) -> Result<Self> {
        let session = config.session()?;
        let client = ApiClient::new(config.api.clone(), session)?;
        Ok(Self {
            client,
            page_size: config.page_size,
            json,
        })
    }
}

pub async fn run(cli: Cli, config: AppConfig) -> Result<()> {
    let ctx = Context::new(&config, cli.json)?;

    match &cli.command {
        Command::Login(args) => account::login(&ctx, args).await,
        Command::Logout => account::logout(&ctx),
        Command::Whoami => account::whoami(&ctx).await,
        Command::Report(command) => report::run(&ctx, command).await,
        Command::Portal(command) => account::run(&ctx, command).await,
        Command::Invoice(command) => report::invoice(&ctx, command).await,
        record => match record.module_action() {
            Some((module, action)) => modules::run(&ctx, module, action).await,
            None => bail!("unsupported command"),
        },
    }
}
