use std::path::PathBuf;

use colored::*;
use indicatif::HumanBytes;
use zipsplit_core::codec::Codec;
use zipsplit_core::error::Result;
use zipsplit_core::pack::writer::entry_name;
use zipsplit_core::{
    AssumeYes, Event, Prompt, SplitOptions, WriteOptions, archive_path, limit_from_mb,
    list_entries, plan, split,
};

use crate::presentation::cli::SourceArgs;
use crate::presentation::prompt::StdinPrompt;

pub fn handle_split(
    source: SourceArgs,
    level: Option<i64>,
    store: bool,
    deterministic: bool,
    yes: bool,
) -> Result<()> {
    let limit = limit_from_mb(source.size_mb)?;
    let codec = if store { Codec::Store } else { Codec::Deflate };
    // reject a bad level before anything is walked or written
    codec.level(level)?;

    println!("Directory to be zipped: {}", source.dir.display());
    println!("Split size: {}MB", source.size_mb);

    let opts = SplitOptions {
        root: source.dir,
        out_dir: source.out,
        prefix: source.name,
        limit,
        write: WriteOptions {
            codec,
            level,
            deterministic,
        },
    };
    let mut prompt: Box<dyn Prompt> = if yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinPrompt)
    };

    let report = split(&opts, prompt.as_mut(), |ev| match ev {
        Event::Planned(p) => println!(
            "Total zip files to be created - {}",
            p.groups.len().to_string().green()
        ),
        Event::Creating { path, .. } => println!("{} {}", "Creating".red(), path.display()),
        Event::Created(s) => println!(
            "{} {} ({} files, {})",
            "Created".green(),
            s.path.display(),
            s.entries,
            HumanBytes(s.archive_bytes)
        ),
    })?;

    println!(
        "{} {} files, {} -> {} in {} archive(s)",
        "Done:".green().bold(),
        report.files,
        HumanBytes(report.source_bytes),
        HumanBytes(report.archive_bytes),
        report.archives.len()
    );
    Ok(())
}

pub fn handle_plan(source: SourceArgs, as_json: bool) -> Result<()> {
    let limit = limit_from_mb(source.size_mb)?;
    let p = plan(&source.dir, limit)?;

    if as_json {
        let text = serde_json::to_string_pretty(&p.view(&source.out, &source.name))
            .map_err(std::io::Error::other)?;
        println!("{text}");
        return Ok(());
    }

    for (i, g) in p.groups.iter().enumerate() {
        let out = archive_path(&source.out, &source.name, i + 1);
        println!(
            "{}  {} files  {}",
            out.display().to_string().cyan(),
            g.len(),
            HumanBytes(g.size)
        );
        for m in &g.members {
            println!("    {}", entry_name(&p.root, &m.path).dimmed());
        }
    }
    println!(
        "{} archive(s), {} files, {}",
        p.groups.len().to_string().green(),
        p.file_count(),
        HumanBytes(p.total_bytes())
    );
    Ok(())
}

pub fn handle_list(archive: PathBuf) -> Result<()> {
    let rows = list_entries(&archive)?;
    for r in &rows {
        println!(
            "{:>12}  {:>12}  {:<8}  {}",
            r.size, r.compressed, r.method, r.name
        );
    }
    let total: u64 = rows.iter().map(|r| r.size).sum();
    eprintln!("list: {} entries, {}", rows.len(), HumanBytes(total));
    Ok(())
}
