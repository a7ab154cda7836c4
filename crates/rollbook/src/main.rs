//! `rollbook` - CLI for managing student records
//!
//! This binary provides the command-line front end to the record store.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;

use rollbook::blob::BlobStore;
use rollbook::cli::{Cli, Command, ConfigCommand, EditCommand, FieldArgs};
use rollbook::{init_logging, Config, Error, RecordId, RecordStore, StudentRecord};

type Store = RecordStore<Box<dyn BlobStore>>;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    // Only commands that need the configuration load it, so `config path` and
    // `config validate` still run when the file is broken.
    let config_path = cli.config;
    let load_config = || Config::load_from(config_path.clone());

    match cli.command {
        Command::List(cmd) => handle_list(&open_store(&load_config()?)?, cmd.json),
        Command::Show(cmd) => handle_show(&open_store(&load_config()?)?, &cmd.id, cmd.json),
        Command::Add(cmd) => handle_add(&mut open_store(&load_config()?)?, cmd.fields, cmd.json),
        Command::Edit(cmd) => handle_edit(&mut open_store(&load_config()?)?, cmd),
        Command::Delete(cmd) => handle_delete(&mut open_store(&load_config()?)?, &cmd.id),
        Command::Validate(cmd) => {
            handle_validate(&open_store(&load_config()?)?, cmd.fields, cmd.json)
        }
        Command::Status(cmd) => {
            let config = load_config()?;
            handle_status(&config, &open_store(&config)?, cmd.json)
        }
        Command::Reset(cmd) => handle_reset(&mut open_store(&load_config()?)?, cmd.yes),
        Command::Config(cmd) => handle_config(config_path.clone(), cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<Store> {
    let blob = config
        .open_blob_store()
        .context("failed to open record storage")?;
    Ok(RecordStore::load(blob, config.storage.key.clone()).with_rules(config.rules()?))
}

/// Retry the last write if it failed, so the command reports the failure.
fn ensure_synced(store: &mut Store) -> anyhow::Result<()> {
    if !store.is_synced() {
        store
            .flush()
            .context("changes were applied in memory but could not be saved")?;
    }
    Ok(())
}

fn handle_list(store: &Store, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(store.list())?);
        return Ok(());
    }

    if store.is_empty() {
        println!("No students yet. Add one with `rollbook add`.");
        return Ok(());
    }

    println!(
        "{:<20} {:<10} {:<18} {:>4} {:<10} {:<18} {:>6}  ID",
        "Name", "Reg No", "Dept", "Age", "DOB", "Gender", "Marks"
    );
    for record in store.list() {
        println!(
            "{:<20} {:<10} {:<18} {:>4} {:<10} {:<18} {:>6}  {}",
            record.name,
            record.reg_no,
            record.dept,
            record.age,
            display_dob(record),
            record.gender,
            record.marks,
            record.id
        );
    }
    Ok(())
}

fn handle_show(store: &Store, id: &RecordId, json: bool) -> anyhow::Result<()> {
    let record = store
        .get(id)
        .ok_or_else(|| Error::record_not_found(id.as_str()))?;
    print_record(record, json)
}

fn handle_add(store: &mut Store, fields: FieldArgs, json: bool) -> anyhow::Result<()> {
    let record = store.create(&fields.into_input())?;
    ensure_synced(store)?;
    if json {
        print_record(&record, true)
    } else {
        println!("Created {}", record.id);
        Ok(())
    }
}

fn handle_edit(store: &mut Store, cmd: EditCommand) -> anyhow::Result<()> {
    let EditCommand { id, fields, json } = cmd;
    let form = store
        .edit_form(&id)
        .ok_or_else(|| Error::record_not_found(id.as_str()))?
        .merged(fields.into());

    let Some(record) = store.update(&id, &form)? else {
        return Err(Error::record_not_found(id.as_str()).into());
    };
    ensure_synced(store)?;
    if json {
        print_record(&record, true)
    } else {
        println!("Updated {}", record.id);
        Ok(())
    }
}

fn handle_delete(store: &mut Store, id: &RecordId) -> anyhow::Result<()> {
    if store.delete(id) {
        ensure_synced(store)?;
        println!("Deleted {id}");
    } else {
        println!("No record with id {id}; nothing deleted");
    }
    Ok(())
}

fn handle_validate(store: &Store, fields: FieldArgs, json: bool) -> anyhow::Result<()> {
    let result = store.validate(&fields.into_input());
    if json {
        println!("{}", serde_json::to_string_pretty(&result.errors)?);
    } else if result.is_valid() {
        println!("All fields are valid.");
    } else {
        for (field, message) in result.errors.iter() {
            println!("  {field:<8} {message}");
        }
    }

    if !result.is_valid() {
        bail!("{} field(s) failed validation", result.errors.len());
    }
    Ok(())
}

fn handle_status(config: &Config, store: &Store, json: bool) -> anyhow::Result<()> {
    let last_written = store.last_written()?;
    let location = match config.storage.backend {
        rollbook::config::Backend::Sqlite => config.database_path().display().to_string(),
        rollbook::config::Backend::File => config.blob_dir().display().to_string(),
        rollbook::config::Backend::Memory => "(process memory)".to_string(),
    };

    if json {
        let status = serde_json::json!({
            "backend": store.blob().name(),
            "location": location,
            "key": store.key(),
            "records": store.len(),
            "loaded_from": store.source().to_string(),
            "synced": store.is_synced(),
            "last_written": last_written.map(|t| t.to_rfc3339()),
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("rollbook status");
        println!("---------------");
        println!("Backend:       {}", store.blob().name());
        println!("Location:      {location}");
        println!("Key:           {}", store.key());
        println!("Records:       {}", store.len());
        println!("Loaded from:   {}", store.source());
        println!("Synced:        {}", store.is_synced());
        match last_written {
            Some(t) => println!("Last written:  {}", t.to_rfc3339()),
            None => println!("Last written:  unknown"),
        }
    }
    Ok(())
}

fn handle_reset(store: &mut Store, yes: bool) -> anyhow::Result<()> {
    if !yes {
        println!("This will delete all {} records and restore the sample data.", store.len());
        println!("Use --yes to confirm.");
        return Ok(());
    }
    store.reset().context("failed to reset records")?;
    println!("Restored {} sample records.", store.len());
    Ok(())
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print_config(&config);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path.clone()))
                .with_context(|| format!("configuration {} is invalid", path.display()))?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}

fn print_config(config: &Config) {
    println!("Current Configuration");
    println!("=====================");
    println!();
    println!("[Storage]");
    println!("  Backend:            {}", config.storage.backend);
    println!("  Database path:      {}", config.database_path().display());
    println!("  Blob directory:     {}", config.blob_dir().display());
    println!("  Key:                {}", config.storage.key);
    println!();
    println!("[Validation]");
    println!(
        "  Reg no pattern:     {}",
        config.validation.reg_no_pattern.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Restrict gender:    {}",
        config.validation.restrict_gender
    );
}

fn print_record(record: &StudentRecord, json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        println!("ID:             {}", record.id);
        println!("Name:           {}", record.name);
        println!("Reg No:         {}", record.reg_no);
        println!("Department:     {}", record.dept);
        println!("Age:            {}", record.age);
        println!("Date of Birth:  {}", display_dob(record));
        println!("Gender:         {}", record.gender);
        println!("Internal Marks: {}", record.marks);
    }
    Ok(())
}

fn display_dob(record: &StudentRecord) -> &str {
    if record.dob.is_empty() {
        "-"
    } else {
        &record.dob
    }
}
