/********************************************************************************
 * Copyright (c) 2024 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

mod config;

use crate::config::CliConfig;
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use gnip_client::codec;
use gnip_client::resource::{Activities, Filter, Resource, Rule, RuleType};
use gnip_client::{Config, GnipConnection, TracingLogger};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(version, about = "Talk to the Gnip activity streaming service")]
struct GnipArgs {
    #[arg(short, long, value_name = "FILE")]
    config: PathBuf,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every publisher.
    Publishers,
    /// Show one publisher.
    Publisher { name: String },
    /// Show one filter.
    Filter { publisher: String, name: String },
    /// Create a filter from `type:value` rules.
    CreateFilter {
        publisher: String,
        name: String,
        #[arg(long = "rule", value_name = "TYPE:VALUE", value_parser = parse_rule)]
        rules: Vec<Rule>,
        #[arg(long)]
        notifications_only: bool,
        #[arg(long, value_name = "URL")]
        post_url: Option<String>,
    },
    DeleteFilter { publisher: String, name: String },
    AddRule {
        publisher: String,
        filter: String,
        #[arg(value_parser = parse_rule)]
        rule: Rule,
    },
    DeleteRule {
        publisher: String,
        filter: String,
        #[arg(value_parser = parse_rule)]
        rule: Rule,
    },
    /// Read one bucket of activities or notifications.
    Poll {
        publisher: String,
        #[arg(long)]
        filter: Option<String>,
        /// Read full activities from the publisher stream instead of notifications.
        #[arg(long, conflicts_with = "filter")]
        activities: bool,
        /// Any instant inside the wanted bucket, RFC 3339.
        #[arg(long, value_parser = parse_instant)]
        at: Option<DateTime<Utc>>,
    },
    /// Publish the `<activities>` document stored in FILE.
    Publish {
        publisher: String,
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("unable to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unable to parse {path}: {reason}")]
    Parse { path: PathBuf, reason: String },
    #[error(transparent)]
    Client(#[from] gnip_client::Error),
    #[error(transparent)]
    Codec(#[from] gnip_client::CodecError),
}

fn parse_rule(value: &str) -> Result<Rule, String> {
    let (rule_type, rule_value) = value
        .split_once(':')
        .ok_or_else(|| format!("expected TYPE:VALUE, got `{value}`"))?;
    let rule_type: RuleType = rule_type.parse()?;
    if rule_value.is_empty() {
        return Err("rule value must not be empty".to_string());
    }
    Ok(Rule::new(rule_type, rule_value))
}

fn parse_instant(value: &str) -> Result<DateTime<Utc>, String> {
    DateTime::parse_from_rfc3339(value)
        .map(|instant| instant.with_timezone(&Utc))
        .map_err(|err| format!("invalid RFC 3339 instant `{value}`: {err}"))
}

fn load_config(path: &Path) -> Result<CliConfig, CliError> {
    let contents = fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    json5::from_str(&contents).map_err(|err| CliError::Parse {
        path: path.to_path_buf(),
        reason: err.to_string(),
    })
}

fn init_tracing(log_filter: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(log_filter.unwrap_or("warn")));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn print<R: Resource>(resource: &R) -> Result<(), CliError> {
    println!("{}", codec::to_xml(resource)?);
    Ok(())
}

fn run(args: GnipArgs) -> Result<(), CliError> {
    let cli_config = load_config(&args.config)?;
    init_tracing(cli_config.log_filter.as_deref());

    let config = Config::try_from(cli_config.client)?;
    info!(server = config.server(), "Started gnip client");
    let mut gnip = GnipConnection::new(config)?;
    if cli_config.wire_log {
        gnip = gnip.with_logger(Arc::new(TracingLogger));
    }

    match args.command {
        Command::Publishers => print(&gnip.get_publishers()?),
        Command::Publisher { name } => print(&gnip.get_publisher(&name)?),
        Command::Filter { publisher, name } => print(&gnip.get_filter(&publisher, &name)?),
        Command::CreateFilter {
            publisher,
            name,
            rules,
            notifications_only,
            post_url,
        } => {
            let mut filter = Filter::new(name).with_full_data(!notifications_only);
            filter.post_url = post_url;
            filter.rules = rules;
            print(&gnip.create_filter(&publisher, &filter)?)
        }
        Command::DeleteFilter { publisher, name } => {
            print(&gnip.delete_filter(&publisher, &name)?)
        }
        Command::AddRule {
            publisher,
            filter,
            rule,
        } => print(&gnip.add_rule(&publisher, &filter, &rule)?),
        Command::DeleteRule {
            publisher,
            filter,
            rule,
        } => print(&gnip.delete_rule(&publisher, &filter, &rule)?),
        Command::Poll {
            publisher,
            filter,
            activities,
            at,
        } => {
            let batch = match filter {
                Some(name) => {
                    let filter = gnip.get_filter(&publisher, &name)?;
                    gnip.get_filter_activities(&publisher, &filter, at)?
                }
                None if activities => gnip.get_publisher_activities(&publisher, at)?,
                None => gnip.get_publisher_notifications(&publisher, at)?,
            };
            print(&batch)
        }
        Command::Publish { publisher, file } => {
            let contents = fs::read(&file).map_err(|source| CliError::Io {
                path: file.clone(),
                source,
            })?;
            let batch: Activities = codec::from_xml(&contents)?;
            match gnip.publish(&publisher, &batch)? {
                Some(ack) => print(&ack),
                None => {
                    info!(publisher = publisher.as_str(), "Nothing to publish");
                    Ok(())
                }
            }
        }
    }
}

fn main() -> ExitCode {
    let args = GnipArgs::parse();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(err = %err, "gnip command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
