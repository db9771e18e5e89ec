//! Hashed-seed search CLI
//!
//! Usage: gen5seed_search <version> <mac> --date <DATE> --timer0 <RANGE> --vcount <RANGE> [options]
//!
//! Example:
//!   gen5seed_search black-en 00:09:BF:12:34:56 --date 2011-03-06 \
//!     --timer0 C79-C7A --vcount 60 --frames 1-60 --nature Timid \
//!     --min-ivs 31/0/31/31/31/31 --shiny --tid 12345 --sid 54321
//!
//! The tool prints an expected-result estimate before searching, then
//! streams matches and a progress percentage while the workers run.

use gen5seed_engine::app::criteria::{AbilitySelector, Criteria, Shininess};
use gen5seed_engine::app::runner::{CancelToken, Match, SearchOutcome};
use gen5seed_engine::constants::{
    KEY_INPUT_DEFAULT, SINGLE_BUTTONS, THREE_BUTTON_COMBOS, TWO_BUTTON_COMBOS,
};
use gen5seed_engine::domain::characteristic::Characteristic;
use gen5seed_engine::domain::frame::FrameRange;
use gen5seed_engine::domain::hashed_seed::{GameDate, SeedParameters, Version};
use gen5seed_engine::domain::hidden_power::{self, Element, ElementSet};
use gen5seed_engine::domain::ivs::Ivs;
use gen5seed_engine::domain::nature::{Nature, NatureSet};
use gen5seed_engine::domain::pid::{GameFamily, Gender, GenderRatio};
use gen5seed_engine::{HashedSeed, IvCriteria, PidCriteria, expected_results, search_seeds};
use log::LevelFilter;
use std::env;
use std::io::{self, Write};
use std::sync::Mutex;
use std::time::Instant;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} <version> <mac> [options]", program);
    eprintln!();
    eprintln!("  version: black-en | white-en | black-jp | white-jp");
    eprintln!("  mac:     console MAC address, e.g. 00:09:BF:12:34:56");
    eprintln!();
    eprintln!("Seed space (required):");
    eprintln!("  --date YYYY-MM-DD[..YYYY-MM-DD]   boot date range");
    eprintln!("  --timer0 HEX[-HEX]                timer0 calibration range");
    eprintln!("  --vcount HEX[-HEX]                vcount calibration range");
    eprintln!();
    eprintln!("Seed space (optional):");
    eprintln!("  --time HH:MM:SS[..HH:MM:SS]       boot time window (default whole day)");
    eprintln!("  --keys none|single|double|triple  held-button combos to try (default none)");
    eprintln!();
    eprintln!("Frame filters:");
    eprintln!("  --frames MIN[-MAX]                PID frame range (default 1-60)");
    eprintln!("  --family gen5|gen34               frame encoding family (default gen5)");
    eprintln!("  --nature NAME[,NAME...]           accepted natures");
    eprintln!("  --ability 0|1                     required ability slot");
    eprintln!("  --gender male|female              required gender");
    eprintln!("  --gender-ratio 1:7|1:3|1:1|3:1    species female ratio");
    eprintln!("  --min-ivs HP/AT/DF/SA/SD/SP       lower IV bound (default all 0)");
    eprintln!("  --max-ivs HP/AT/DF/SA/SD/SP       upper IV bound (default all 31)");
    eprintln!("  --hidden-power TYPE[,TYPE...]     accepted hidden power types");
    eprintln!("  --min-hp-power N                  minimum hidden power strength");
    eprintln!("  --shiny                           keep only shiny frames");
    eprintln!("  --tid N --sid N                   trainer IDs for the shiny check");
    eprintln!();
    eprintln!("Execution:");
    eprintln!("  --threads N                       worker threads (default: all cores)");
    eprintln!("  --verbose                         debug logging");
    std::process::exit(1);
}

fn fail(message: String) -> ! {
    eprintln!("Error: {}", message);
    std::process::exit(1);
}

fn parse_version(value: &str) -> Option<Version> {
    match value {
        "black-en" => Some(Version::BlackEnglish),
        "white-en" => Some(Version::WhiteEnglish),
        "black-jp" => Some(Version::BlackJapanese),
        "white-jp" => Some(Version::WhiteJapanese),
        _ => None,
    }
}

fn parse_mac(value: &str) -> Option<u64> {
    let digits: String = value.chars().filter(|c| !matches!(c, ':' | '-')).collect();
    if digits.len() != 12 {
        return None;
    }
    u64::from_str_radix(&digits, 16).ok()
}

/// "A" or "A-B", hexadecimal
fn parse_hex_range(value: &str) -> Option<(u32, u32)> {
    let (min, max) = match value.split_once('-') {
        Some((a, b)) => (a, b),
        None => (value, value),
    };
    Some((
        u32::from_str_radix(min, 16).ok()?,
        u32::from_str_radix(max, 16).ok()?,
    ))
}

/// "A" or "A-B", decimal
fn parse_dec_range(value: &str) -> Option<(u32, u32)> {
    let (min, max) = match value.split_once('-') {
        Some((a, b)) => (a, b),
        None => (value, value),
    };
    Some((min.parse().ok()?, max.parse().ok()?))
}

fn parse_date(value: &str) -> Option<GameDate> {
    let mut parts = value.splitn(3, '-');
    let year: u16 = parts.next()?.parse().ok()?;
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    if !(2000..=2099).contains(&year) || !(1..=12).contains(&month) || !(1..=31).contains(&day) {
        return None;
    }
    Some(GameDate::new(year, month, day))
}

fn parse_date_range(value: &str) -> Option<(GameDate, GameDate)> {
    match value.split_once("..") {
        Some((a, b)) => Some((parse_date(a)?, parse_date(b)?)),
        None => {
            let d = parse_date(value)?;
            Some((d, d))
        }
    }
}

/// "HH:MM:SS" as seconds since midnight
fn parse_time(value: &str) -> Option<u32> {
    let mut parts = value.splitn(3, ':');
    let hour: u32 = parts.next()?.parse().ok()?;
    let minute: u32 = parts.next()?.parse().ok()?;
    let second: u32 = parts.next()?.parse().ok()?;
    if hour > 23 || minute > 59 || second > 59 {
        return None;
    }
    Some(hour * 3600 + minute * 60 + second)
}

fn parse_time_range(value: &str) -> Option<(u32, u32)> {
    match value.split_once("..") {
        Some((a, b)) => Some((parse_time(a)?, parse_time(b)?)),
        None => {
            let t = parse_time(value)?;
            Some((t, t))
        }
    }
}

/// Six slash-separated values, 0-31
fn parse_ivs(value: &str) -> Option<Ivs> {
    let parts: Vec<u32> = value.split('/').filter_map(|s| s.parse().ok()).collect();
    if parts.len() != 6 || parts.iter().any(|&v| v > 31) {
        return None;
    }
    Some(Ivs::new(
        parts[0], parts[1], parts[2], parts[3], parts[4], parts[5],
    ))
}

fn parse_natures(value: &str) -> Option<NatureSet> {
    value
        .split(',')
        .map(Nature::from_name)
        .collect::<Option<NatureSet>>()
        .filter(|set| !set.is_empty())
}

fn parse_hidden_types(value: &str) -> Option<ElementSet> {
    let mut set = ElementSet::empty();
    for name in value.split(',') {
        let element = Element::from_name(name)?;
        if element == Element::Normal {
            return None;
        }
        set.insert(element);
    }
    Some(set)
}

/// Key register words for each hold level; levels are cumulative
fn key_combos(level: &str) -> Option<Vec<u32>> {
    let mut combos = vec![KEY_INPUT_DEFAULT];
    match level {
        "none" => {}
        "single" => {
            combos.extend(SINGLE_BUTTONS.iter().map(|m| KEY_INPUT_DEFAULT ^ m));
        }
        "double" => {
            combos.extend(SINGLE_BUTTONS.iter().map(|m| KEY_INPUT_DEFAULT ^ m));
            combos.extend(TWO_BUTTON_COMBOS.iter().map(|m| KEY_INPUT_DEFAULT ^ m));
        }
        "triple" => {
            combos.extend(SINGLE_BUTTONS.iter().map(|m| KEY_INPUT_DEFAULT ^ m));
            combos.extend(TWO_BUTTON_COMBOS.iter().map(|m| KEY_INPUT_DEFAULT ^ m));
            combos.extend(THREE_BUTTON_COMBOS.iter().map(|m| KEY_INPUT_DEFAULT ^ m));
        }
        _ => return None,
    }
    Some(combos)
}

struct Options {
    version: Version,
    mac_address: u64,
    dates: Option<(GameDate, GameDate)>,
    times: (u32, u32),
    timer0: Option<(u32, u32)>,
    vcount: Option<(u32, u32)>,
    keys: Vec<u32>,
    frames: (u32, u32),
    family: GameFamily,
    pid: PidCriteria,
    ivs: IvCriteria,
    shiny: bool,
    tid: u16,
    sid: u16,
    threads: usize,
    verbose: bool,
}

fn option_value<'a>(args: &'a [String], i: &mut usize, option: &str) -> &'a str {
    *i += 1;
    match args.get(*i) {
        Some(value) => value.as_str(),
        None => fail(format!("{} requires a value", option)),
    }
}

fn parse_args() -> Options {
    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("gen5seed_search");
    if args.len() < 3 {
        usage(program);
    }

    let version = parse_version(&args[1])
        .unwrap_or_else(|| fail(format!("unknown version '{}'", args[1])));
    let mac_address =
        parse_mac(&args[2]).unwrap_or_else(|| fail(format!("invalid MAC address '{}'", args[2])));

    let mut options = Options {
        version,
        mac_address,
        dates: None,
        times: (0, 86_399),
        timer0: None,
        vcount: None,
        keys: vec![KEY_INPUT_DEFAULT],
        frames: (1, 60),
        family: GameFamily::Gen5,
        pid: PidCriteria::default(),
        ivs: IvCriteria::default(),
        shiny: false,
        tid: 0,
        sid: 0,
        threads: 0,
        verbose: false,
    };

    let mut i = 3;
    while i < args.len() {
        let option = args[i].as_str();
        let mut value = || option_value(&args, &mut i, option);
        match option {
            "--date" => {
                let v = value();
                options.dates =
                    Some(parse_date_range(v).unwrap_or_else(|| {
                        fail(format!("invalid date '{}' (YYYY-MM-DD)", v))
                    }));
            }
            "--time" => {
                let v = value();
                options.times = parse_time_range(v)
                    .unwrap_or_else(|| fail(format!("invalid time '{}' (HH:MM:SS)", v)));
            }
            "--timer0" => {
                let v = value();
                options.timer0 = Some(
                    parse_hex_range(v)
                        .unwrap_or_else(|| fail(format!("invalid timer0 range '{}'", v))),
                );
            }
            "--vcount" => {
                let v = value();
                options.vcount = Some(
                    parse_hex_range(v)
                        .unwrap_or_else(|| fail(format!("invalid vcount range '{}'", v))),
                );
            }
            "--keys" => {
                let v = value();
                options.keys = key_combos(v)
                    .unwrap_or_else(|| fail(format!("unknown key level '{}'", v)));
            }
            "--frames" => {
                let v = value();
                options.frames = parse_dec_range(v)
                    .unwrap_or_else(|| fail(format!("invalid frame range '{}'", v)));
            }
            "--family" => {
                options.family = match value() {
                    "gen5" => GameFamily::Gen5,
                    "gen34" => GameFamily::Gen34,
                    other => fail(format!("unknown family '{}'", other)),
                };
            }
            "--nature" => {
                let v = value();
                options.pid.natures = parse_natures(v)
                    .unwrap_or_else(|| fail(format!("unknown nature in '{}'", v)));
            }
            "--ability" => {
                options.pid.ability = match value() {
                    "0" => AbilitySelector::First,
                    "1" => AbilitySelector::Second,
                    other => fail(format!("invalid ability slot '{}'", other)),
                };
            }
            "--gender" => {
                options.pid.gender = match value() {
                    "male" => Gender::Male,
                    "female" => Gender::Female,
                    other => fail(format!("invalid gender '{}'", other)),
                };
            }
            "--gender-ratio" => {
                options.pid.gender_ratio = match value() {
                    "1:7" => GenderRatio::OneEighthFemale,
                    "1:3" => GenderRatio::OneFourthFemale,
                    "1:1" => GenderRatio::OneHalfFemale,
                    "3:1" => GenderRatio::ThreeFourthsFemale,
                    "female" => GenderRatio::FemaleOnly,
                    "male" => GenderRatio::MaleOnly,
                    other => fail(format!("invalid gender ratio '{}'", other)),
                };
            }
            "--min-ivs" => {
                let v = value();
                options.ivs.min = parse_ivs(v)
                    .unwrap_or_else(|| fail(format!("invalid IVs '{}' (HP/AT/DF/SA/SD/SP)", v)));
            }
            "--max-ivs" => {
                let v = value();
                options.ivs.max = parse_ivs(v)
                    .unwrap_or_else(|| fail(format!("invalid IVs '{}' (HP/AT/DF/SA/SD/SP)", v)));
            }
            "--hidden-power" => {
                let v = value();
                options.ivs.hidden_types = parse_hidden_types(v)
                    .unwrap_or_else(|| fail(format!("unknown hidden power type in '{}'", v)));
            }
            "--min-hp-power" => {
                let v = value();
                options.ivs.min_hidden_power = v
                    .parse()
                    .ok()
                    .filter(|&p| p <= 70)
                    .unwrap_or_else(|| fail(format!("invalid hidden power strength '{}'", v)));
            }
            "--shiny" => options.shiny = true,
            "--tid" => {
                let v = value();
                options.tid = v
                    .parse()
                    .unwrap_or_else(|_| fail(format!("invalid trainer ID '{}'", v)));
            }
            "--sid" => {
                let v = value();
                options.sid = v
                    .parse()
                    .unwrap_or_else(|_| fail(format!("invalid secret ID '{}'", v)));
            }
            "--threads" => {
                let v = value();
                options.threads = v
                    .parse()
                    .unwrap_or_else(|_| fail(format!("invalid thread count '{}'", v)));
            }
            "--verbose" => options.verbose = true,
            "--help" | "-h" => usage(program),
            other => fail(format!("unknown option '{}'", other)),
        }
        i += 1;
    }

    options
}

fn build_criteria(options: &Options) -> Criteria {
    let (date_min, date_max) = match options.dates {
        Some(range) => range,
        None => fail("--date is required".to_string()),
    };
    let (timer0_min, timer0_max) = match options.timer0 {
        Some(range) => range,
        None => fail("--timer0 is required".to_string()),
    };
    let (vcount_min, vcount_max) = match options.vcount {
        Some(range) => range,
        None => fail("--vcount is required".to_string()),
    };

    Criteria {
        seed_parameters: SeedParameters {
            version: options.version,
            mac_address: options.mac_address,
            timer0_min,
            timer0_max,
            vcount_min,
            vcount_max,
            date_min,
            date_max,
            second_min: options.times.0,
            second_max: options.times.1,
            key_combos: options.keys.clone(),
        },
        frame_range: FrameRange::new(options.frames.0, options.frames.1),
        family: options.family,
        pid: options.pid,
        ivs: options.ivs,
        shiny_only: options.shiny,
        shininess: Shininess::MayBeShiny,
        tid: options.tid,
        sid: options.sid,
        num_threads: options.threads,
    }
}

fn print_match(m: &Match<HashedSeed>, family: GameFamily) {
    let frame = &m.frame;
    println!(
        "  seed {}  frame {:>4}  PID {}  {:<7}  ability {}  IVs {} (sum {})  HP {} {}  {}",
        m.seed,
        frame.number,
        frame.pid,
        frame.pid.nature(),
        frame.pid.ability(family),
        frame.ivs,
        frame.ivs.sum(),
        hidden_power::hidden_power_type(frame.ivs),
        hidden_power::hidden_power(frame.ivs),
        Characteristic::from(frame.pid, frame.ivs),
    );
}

fn main() {
    let options = parse_args();

    simple_logger::SimpleLogger::new()
        .with_level(if options.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init()
        .unwrap();

    let criteria = build_criteria(&options);

    match expected_results(&criteria) {
        Ok(estimate) => println!("Expected results: about {}", estimate),
        Err(e) => fail(e.to_string()),
    }

    let num_matches = Mutex::new(0u64);
    let family = options.family;
    let start = Instant::now();

    let on_result = |m: Match<HashedSeed>| {
        // clear a pending progress line before printing over it
        print!("\r\x1b[K");
        print_match(&m, family);
        *num_matches.lock().unwrap() += 1;
    };
    let on_progress = |done: u64, total: u64| {
        let percent = if total == 0 {
            100.0
        } else {
            done as f64 * 100.0 / total as f64
        };
        print!("\rSearching... {:.1}% ({}/{} seeds)", percent, done, total);
        let _ = io::stdout().flush();
    };

    let outcome = match search_seeds(&criteria, on_result, on_progress, &CancelToken::new()) {
        Ok(outcome) => outcome,
        Err(e) => fail(e.to_string()),
    };

    let elapsed = start.elapsed();
    let num_matches = num_matches.into_inner().unwrap();

    println!();
    match outcome {
        SearchOutcome::Completed => {
            println!(
                "Found {} result(s) in {:.2} seconds.",
                num_matches,
                elapsed.as_secs_f64()
            );
        }
        SearchOutcome::Cancelled => {
            println!("Search cancelled after {:.2} seconds.", elapsed.as_secs_f64());
        }
    }

    if num_matches == 0 && outcome == SearchOutcome::Completed {
        println!("No seed matched. Check the timer0/vcount calibration and widen");
        println!("the frame range before loosening the IV criteria.");
    }
}
