use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use reportsheets::command::ReplCommand;
use reportsheets::state::CellPosition;
use reportsheets::upload::{Stage, UploadConfig, UploadFlow};

/// Department report sheets: upload, edit, and stage Excel workbooks.
#[derive(Parser, Debug)]
#[command(name = "reportsheets", version, about)]
struct Args {
    /// Workbook to open on startup
    file: Option<PathBuf>,

    /// JSON config file (defaults apply when absent)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Open the startup workbook read-only
    #[arg(long)]
    read_only: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => match UploadConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config {}: {}", path.display(), err);
                return ExitCode::FAILURE;
            }
        },
        None => UploadConfig::default(),
    };

    let mut flow = UploadFlow::new(config);

    if let Some(path) = &args.file {
        let result = if args.read_only {
            flow.open_file_read_only(path).await
        } else {
            flow.open_file(path).await
        };
        match result {
            Ok(()) => println!("File uploaded successfully."),
            Err(err) => eprintln!("Upload failed: {err}"),
        }
    }

    render(&flow);
    repl(&mut flow).await;
    ExitCode::SUCCESS
}

async fn repl(flow: &mut UploadFlow) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        prompt(flow);
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            _ => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let Some(command) = ReplCommand::parse(&line) else {
            println!("Unknown command. Type 'help'.");
            continue;
        };

        match command {
            ReplCommand::Select(pos) => select(flow, pos),
            ReplCommand::Input(text) => {
                if flow.update_input(&text) {
                    println!("Buffer: {:?}", text);
                } else {
                    println!("No cell selected. Use 'select B2' first.");
                }
            }
            ReplCommand::Commit => {
                if flow.commit() {
                    println!("Committed.");
                } else {
                    println!("Nothing to commit.");
                }
            }
            ReplCommand::Write => match flow.save() {
                Ok(()) if flow.stage() == Stage::Edit => {
                    println!("Sheet saved and ready for upload.")
                }
                Ok(()) => println!("No sheet open."),
                Err(err) => eprintln!("Save failed: {err}"),
            },
            ReplCommand::ForceWrite => match flow.save_forced() {
                Ok(()) if flow.stage() == Stage::Edit => {
                    println!("Sheet saved and ready for upload.")
                }
                Ok(()) => println!("No sheet open."),
                Err(err) => eprintln!("Save failed: {err}"),
            },
            ReplCommand::WriteTo(path) => match flow.export(&path).await {
                Ok(()) if flow.stage() == Stage::Edit => {
                    println!("Exported to {}.", path.display())
                }
                Ok(()) => println!("No sheet open."),
                Err(err) => eprintln!("Export failed: {err}"),
            },
            ReplCommand::WriteQuit => match flow.save() {
                Ok(()) => break,
                Err(err) => eprintln!("Save failed: {err}"),
            },
            ReplCommand::Quit => {
                if flow.session().is_dirty() {
                    println!("Unsaved changes. Use :q! to discard.");
                } else {
                    break;
                }
            }
            ReplCommand::ForceQuit => break,
            ReplCommand::Edit(path) => match flow.open_file(&path).await {
                Ok(()) => {
                    println!("File uploaded successfully.");
                    render(flow);
                }
                Err(err) => eprintln!("Upload failed: {err}"),
            },
            ReplCommand::View(path) => match flow.open_file_read_only(&path).await {
                Ok(()) => {
                    println!("Opened read-only.");
                    render(flow);
                }
                Err(err) => eprintln!("Upload failed: {err}"),
            },
            ReplCommand::New => {
                flow.create_blank();
                println!("New blank sheet created.");
                render(flow);
            }
            ReplCommand::Reset => {
                flow.reset();
                render(flow);
            }
            ReplCommand::Show => render(flow),
            ReplCommand::Help => help(),
        }
    }
}

fn select(flow: &mut UploadFlow, pos: CellPosition) {
    let in_bounds = flow
        .editor()
        .map(|editor| pos.row < editor.row_count() && pos.col < editor.col_count());
    match in_bounds {
        None => println!("No sheet open. Use :e <path> or :new."),
        Some(false) => println!("{} is outside the grid.", pos.to_reference()),
        Some(true) => {
            flow.select_cell(pos.row, pos.col);
            let buffer = flow
                .editor()
                .map(|editor| editor.input().content().to_string())
                .unwrap_or_default();
            println!("Editing {} (current: {:?})", pos.to_reference(), buffer);
        }
    }
}

const VIEW_ROWS: usize = 10;
const VIEW_COLS: usize = 8;

fn render(flow: &UploadFlow) {
    let Some(editor) = flow.editor() else {
        println!(
            "No sheet open. Upload with :e <path>, or :new for a blank sheet (.xlsx or .xls, up to 10MB)."
        );
        return;
    };

    let rows = editor.row_count().min(VIEW_ROWS);
    let cols = editor.col_count().min(VIEW_COLS);
    let selection = editor.selection();

    print!("    ");
    for header in editor.headers().iter().take(cols) {
        print!(" {:<8.8} ", header);
    }
    println!();

    for row in 0..rows {
        print!("{:>3} ", row + 1);
        for col in 0..cols {
            let text = editor.display_value(row, col);
            if selection == Some(CellPosition::new(row, col)) {
                print!("[{:<8.8}]", editor.input().content());
            } else {
                print!(" {:<8.8} ", text);
            }
        }
        println!();
    }

    let session = flow.session();
    let mode = match editor.selection() {
        Some(_) => "-- EDIT --",
        None => "-- NORMAL --",
    };
    let dirty = if session.is_dirty() { "[+] " } else { "" };
    let read_only = if session.is_read_only() { "[RO] " } else { "" };
    println!("{} {}{}{}", mode, read_only, dirty, session.file_name());
}

fn prompt(flow: &UploadFlow) {
    let marker = match flow.stage() {
        Stage::Choose => "choose",
        Stage::Edit => "edit",
    };
    print!("{marker}> ");
    let _ = std::io::stdout().flush();
}

fn help() {
    println!("File:  :e <path>  :view <path>  :new  :reset  :w  :w <path>  :w!  :wq  :q  :q!");
    println!("Cells: select <ref>   set <text>   commit   show");
}
