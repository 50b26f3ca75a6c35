use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;

use danci_vocab::config::Config;
use danci_vocab::logging;
use danci_vocab::routes::View;
use danci_vocab::speech::{self, CommandSpeaker, SpeechConfig, StderrNotifier};
use danci_vocab::{
    import, statistics, DayBoundary, JsonFileBackend, SystemClock, VocabularyApp, Word,
    WordUpdate,
};

#[derive(Parser)]
#[command(name = "danci-vocab", about = "背单词：间隔复习与每日学习计划", version)]
struct Cli {
    /// Vocabulary data file (overrides VOCAB_DATA_FILE)
    #[arg(long, global = true)]
    data_file: Option<PathBuf>,

    /// Print JSON instead of plain text
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Today's progress and new-word queue
    Today,

    /// List all words
    Words,

    /// Add a word
    Add {
        english: String,
        chinese: String,
        #[arg(long)]
        phonetic: Option<String>,
        /// Part of speech, e.g. "n."
        #[arg(long)]
        pos: Option<String>,
    },

    /// Update fields of a word (does not reschedule it)
    Update {
        id: String,
        #[arg(long)]
        english: Option<String>,
        #[arg(long)]
        chinese: Option<String>,
        #[arg(long)]
        phonetic: Option<String>,
        #[arg(long)]
        pos: Option<String>,
        #[arg(long, conflicts_with = "phonetic")]
        clear_phonetic: bool,
        #[arg(long, conflicts_with = "pos")]
        clear_pos: bool,
    },

    /// Delete a word and its study records
    Delete { id: String },

    /// Record a study result for a word
    Study {
        id: String,
        #[arg(long, conflicts_with = "forgot", required_unless_present = "forgot")]
        remembered: bool,
        #[arg(long)]
        forgot: bool,
        /// Time spent in seconds
        #[arg(long, default_value = "0")]
        duration: u32,
    },

    /// Import words from a JSON or line-based text file
    Import { file: PathBuf },

    /// Words due for review
    Review,

    /// Learning calendar
    Plan,

    /// Words planned for one day of the calendar
    Day { day: u32 },

    /// Study statistics
    Stats,

    /// Read a word aloud
    Speak {
        text: String,
        #[arg(long, default_value = "en-US")]
        lang: String,
    },
}

fn main() -> Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(path) = cli.data_file.clone() {
        config.data_file = path;
    }

    let _log_guard = logging::init_tracing(&config);
    tracing::debug!(data_file = %config.data_file.display(), "starting");

    let backend = JsonFileBackend::new(&config.data_file);
    let path = backend.path().to_path_buf();
    let mut app = VocabularyApp::load(backend, Arc::new(SystemClock), config.day_boundary)
        .with_context(|| format!("failed to load {}", path.display()))?;

    run(&mut app, &config, cli.json, cli.command.unwrap_or(Command::Today))
}

fn run(
    app: &mut VocabularyApp<JsonFileBackend>,
    config: &Config,
    json: bool,
    command: Command,
) -> Result<()> {
    match command {
        Command::Today => {
            let store = app.store();
            let progress = store.today_progress();
            let queue = store.today_new_words_to_learn();
            if json {
                return print_json(&serde_json::json!({
                    "progress": progress,
                    "stats": store.today_stats(),
                    "currentDay": store.current_day_number(),
                    "totalDaysNeeded": store.total_days_needed(),
                    "reviewCount": store.words_to_review().len(),
                    "newWords": queue,
                }));
            }

            heading(View::Home);
            println!(
                "第 {} 天 · 今日新词 {}/{} ({}%) · 待复习 {}",
                store.current_day_number(),
                progress.learned,
                progress.planned,
                progress.percentage,
                store.words_to_review().len()
            );
            println!(
                "剩余未学 {} 个，还需 {} 天",
                store.unlearned_words_count(),
                store.total_days_needed()
            );
            for word in queue {
                print_word(word);
            }
        }
        Command::Words => {
            let words = app.store().words();
            if json {
                return print_json(&words);
            }
            heading(View::Words);
            for word in words {
                print_word(word);
            }
            println!(
                "共 {} 个，已掌握 {} 个",
                app.store().total_words(),
                app.store().mastered_words()
            );
        }
        Command::Add {
            english,
            chinese,
            phonetic,
            pos,
        } => {
            let word = app.add_word(&english, &chinese, phonetic.as_deref(), pos.as_deref())?;
            if json {
                return print_json(&word);
            }
            println!("已添加 {} ({})", word.english, word.id);
        }
        Command::Update {
            id,
            english,
            chinese,
            phonetic,
            pos,
            clear_phonetic,
            clear_pos,
        } => {
            let update = WordUpdate {
                english,
                chinese,
                phonetic: if clear_phonetic { Some(None) } else { phonetic.map(Some) },
                part_of_speech: if clear_pos { Some(None) } else { pos.map(Some) },
                ..Default::default()
            };
            if update.is_empty() {
                bail!("nothing to update");
            }
            if !app.update_word(&id, &update)? {
                bail!("word not found: {id}");
            }
            println!("已更新 {id}");
        }
        Command::Delete { id } => {
            if !app.delete_word(&id)? {
                bail!("word not found: {id}");
            }
            println!("已删除 {id}");
        }
        Command::Study {
            id,
            remembered,
            forgot,
            duration,
        } => {
            let remembered = remembered && !forgot;
            if app.record_study(&id, remembered, duration)?.is_none() {
                bail!("word not found: {id}");
            }
            let word = app
                .store()
                .get_word(&id)
                .with_context(|| format!("word vanished: {id}"))?;
            if json {
                return print_json(word);
            }
            println!(
                "{} 熟练度 {} · 下次复习 {}",
                word.english,
                word.proficiency,
                format_timestamp(word.next_review_at, app.store().boundary())
            );
        }
        Command::Import { file } => {
            let content = std::fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let candidates = import::parse(&content)?;
            let inserted = app.batch_add_words(&candidates)?;
            if json {
                return print_json(&serde_json::json!({
                    "total": candidates.len(),
                    "inserted": inserted,
                }));
            }
            heading(View::Import);
            println!(
                "导入 {} 个，跳过重复 {} 个",
                inserted,
                candidates.len() - inserted
            );
        }
        Command::Review => {
            let due = app.store().words_to_review();
            if json {
                return print_json(&due);
            }
            println!("待复习 {} 个", due.len());
            for word in due {
                print_word(word);
            }
        }
        Command::Plan => {
            let calendar = app.store().learning_calendar();
            if json {
                return print_json(&calendar);
            }
            heading(View::Review);
            for day in &calendar {
                println!(
                    "第 {:>3} 天  {:<8} {:<10} {:>2}/{:<2}  {}",
                    day.day,
                    day.display_date,
                    day.status.as_str(),
                    day.completed_count,
                    day.total_count,
                    View::day_path(day.day)
                );
            }
        }
        Command::Day { day } => {
            let Some(plan) = app.store().day_plan(day) else {
                bail!("day {day} is not in the learning calendar");
            };
            if json {
                return print_json(&plan);
            }
            heading(View::DayWords);
            println!("第 {} 天 · {} · {}", plan.day, plan.display_date, plan.status.as_str());
            for word in &plan.words {
                print_word(word);
            }
        }
        Command::Stats => {
            let summary = statistics::summarize(app.store());
            if json {
                return print_json(&summary);
            }
            heading(View::Statistics);
            println!("单词总数   {}", summary.total_words);
            println!("已掌握     {}", summary.mastered_words);
            println!("待复习     {}", summary.words_to_review);
            println!("未学习     {}", summary.unlearned_words);
            println!("学习次数   {}", summary.total_records);
            println!("记住比例   {:.0}%", summary.remembered_rate * 100.0);
            println!(
                "今日       新词 {} · 复习 {}",
                summary.today.new_words, summary.today.reviewed_words
            );
            for bucket in &summary.proficiency_distribution {
                println!("熟练度 {}   {}", bucket.level, bucket.count);
            }
        }
        Command::Speak { text, lang } => {
            let speaker = CommandSpeaker::detect();
            let base = SpeechConfig {
                rate: config.speech_rate,
                ..SpeechConfig::default()
            };
            speech::speak_word(&speaker, &StderrNotifier, &text, &lang, &base);
        }
    }

    Ok(())
}

fn heading(view: View) {
    println!("== {} ==", view.page_title());
}

fn print_word(word: &Word) {
    let phonetic = word.phonetic.as_deref().unwrap_or("");
    let pos = word.part_of_speech.as_deref().unwrap_or("");
    println!(
        "{:<36}  {:<20} {:<14} {:<6} {}  (熟练度 {}, 复习 {} 次)",
        word.id, word.english, phonetic, pos, word.chinese, word.proficiency, word.review_count
    );
}

fn format_timestamp(ms: i64, boundary: &DayBoundary) -> String {
    chrono::DateTime::<chrono::Utc>::from_timestamp_millis(ms)
        .map(|dt| {
            dt.with_timezone(&boundary.offset())
                .format("%Y-%m-%d %H:%M")
                .to_string()
        })
        .unwrap_or_else(|| ms.to_string())
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
