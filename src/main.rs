//! Command-line interface for pinyin-jyutping
//!
//! Usage:
//!   pinyin-jyutping [OPTIONS] <TEXT>
//!   echo "忘拿一些东西了" | pinyin-jyutping -c cedict.txt

use pinyin_jyutping::{
    collect_headwords, RomanizationOptions, RomanizationSystem, Romanizer, Segmenter,
    SourceFormat, TrieBuilder, TrieSegmenter,
};
use std::env;
use std::fs;
use std::io::{self, BufRead};
use std::sync::Arc;

fn print_help() {
    eprintln!(
        r#"pinyin-jyutping - Convert Chinese sentences to Pinyin or Jyutping

USAGE:
    pinyin-jyutping [OPTIONS] [TEXT]
    echo "忘拿一些东西了" | pinyin-jyutping [OPTIONS]

OPTIONS:
    -d, --dict <FILE>     CC-Canto dictionary source (repeatable)
    -c, --cedict <FILE>   CC-CEDICT dictionary source, Pinyin only (repeatable)
    -w, --words <FILE>    Segmentation word list (jieba format: word freq tag)
        --jieba           Segment with jieba (needs the "jieba" feature)
    -J, --jyutping        Output Jyutping instead of Pinyin
    -n, --tone-numbers    Keep tone numbers instead of tone marks
    -r, --remove-tones    Drop tones entirely
    -s, --spaces          Separate the syllables of a word with spaces
        --json            Output as JSON
    -h, --help            Show this help message

Set RUST_LOG=debug to trace dictionary loading and word resolution.

EXAMPLES:
    pinyin-jyutping -c cedict_ts.u8 "忘拿一些东西了"
    pinyin-jyutping -d cccanto-webdist.txt -J "有啲好貴"
    pinyin-jyutping -c cedict_ts.u8 -n -s "我很好"
"#
    );
}

fn read_file(path: &str) -> String {
    match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path, e);
            std::process::exit(1);
        }
    }
}

fn next_path(args: &[String], i: &mut usize, flag: &str) -> String {
    *i += 1;
    match args.get(*i) {
        Some(path) => path.clone(),
        None => {
            eprintln!("Error: {} requires a file path", flag);
            std::process::exit(1);
        }
    }
}

#[cfg(feature = "jieba")]
fn jieba_segmenter(words: Option<&str>) -> Arc<dyn Segmenter> {
    use pinyin_jyutping::JiebaSegmenter;

    let segmenter = match words {
        Some(content) => JiebaSegmenter::with_dict(&mut io::Cursor::new(content)),
        None => Ok(JiebaSegmenter::new()),
    };
    match segmenter {
        Ok(s) => Arc::new(s),
        Err(e) => {
            eprintln!("Error loading jieba dictionary: {}", e);
            std::process::exit(1);
        }
    }
}

#[cfg(not(feature = "jieba"))]
fn jieba_segmenter(_words: Option<&str>) -> Arc<dyn Segmenter> {
    eprintln!("Error: --jieba requires building with the \"jieba\" feature");
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut canto_paths: Vec<String> = Vec::new();
    let mut cedict_paths: Vec<String> = Vec::new();
    let mut words_path: Option<String> = None;
    let mut use_jieba = false;
    let mut system = RomanizationSystem::Pinyin;
    let mut options = RomanizationOptions::default();
    let mut json_output = false;
    let mut text: Option<String> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => {
                print_help();
                return;
            }
            "-d" | "--dict" => canto_paths.push(next_path(&args, &mut i, "--dict")),
            "-c" | "--cedict" => cedict_paths.push(next_path(&args, &mut i, "--cedict")),
            "-w" | "--words" => words_path = Some(next_path(&args, &mut i, "--words")),
            "--jieba" => use_jieba = true,
            "-J" | "--jyutping" => system = RomanizationSystem::Jyutping,
            "-n" | "--tone-numbers" => options.tone_numbers = true,
            "-r" | "--remove-tones" => options.remove_tones = true,
            "-s" | "--spaces" => options.spaces = true,
            "--json" => json_output = true,
            arg if !arg.starts_with('-') => {
                text = Some(arg.to_string());
            }
            _ => {
                eprintln!("Unknown option: {}", args[i]);
                print_help();
                std::process::exit(1);
            }
        }
        i += 1;
    }

    if canto_paths.is_empty() && cedict_paths.is_empty() {
        eprintln!("Error: at least one dictionary source (--dict or --cedict) is required");
        print_help();
        std::process::exit(1);
    }

    let sources: Vec<(SourceFormat, String)> = canto_paths
        .iter()
        .map(|p| (SourceFormat::CcCanto, read_file(p)))
        .chain(cedict_paths.iter().map(|p| (SourceFormat::CcCedict, read_file(p))))
        .collect();
    let words = words_path.as_deref().map(read_file);

    // Segmentation vocabulary: the word list plus every dictionary headword
    let segmenter: Arc<dyn Segmenter> = if use_jieba {
        jieba_segmenter(words.as_deref())
    } else {
        let mut builder = TrieBuilder::new();
        if let Some(ref content) = words {
            builder.load_word_list(content);
        }
        for (format, content) in &sources {
            collect_headwords(content, *format, &mut builder);
        }
        Arc::new(TrieSegmenter::new(builder.build()))
    };

    let mut builder = Romanizer::builder(Arc::clone(&segmenter));
    for (format, content) in &sources {
        let stats = builder.load(content, *format);
        log::info!("{:?}: {} entries, {} malformed", format, stats.entries, stats.malformed);
    }
    let romanizer = Romanizer::new(builder.build(), segmenter);

    // Read from stdin if no text provided
    let lines: Vec<String> = if let Some(t) = text {
        vec![t]
    } else {
        let stdin = io::stdin();
        let mut lines = Vec::new();
        for line in stdin.lock().lines() {
            match line {
                Ok(l) => lines.push(l),
                Err(e) => {
                    eprintln!("Error reading stdin: {}", e);
                    std::process::exit(1);
                }
            }
        }
        lines
    };

    for line in &lines {
        let output = match romanizer.romanize(line, system, &options) {
            Ok(o) => o,
            Err(e) => {
                eprintln!("Error romanizing '{}': {}", line, e);
                std::process::exit(1);
            }
        };

        if json_output {
            let value = serde_json::json!({
                "input": line,
                "system": system,
                "output": output,
            });
            println!("{}", value);
        } else {
            println!("{}", output);
        }
    }
}
