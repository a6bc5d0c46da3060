//! Runs the bundled meeting schema through the generator many times and checks
//! every documented property of the output. Exits non-zero on any failure.
use colored::Colorize;
use json_mock::Synthesizer;
use once_cell::sync::Lazy;
use rand::Rng;
use regex::Regex;
use serde_json::{json, Value};

const MEETING_SCHEMA: &str = include_str!("../fixtures/meeting.schema.json");
const ROUNDS: usize = 500;

const TOP_LEVEL_KEYS: [&str; 16] = [
    "id", "title", "description", "startDate", "endDate", "attendees", "parentId",
    "locationId", "process", "readOnly", "priorProbability", "channelId", "externalId",
    "tags", "form", "formValue",
];

static PROCESS_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^https://[a-z]+\.corezoid\.com/api/1/json/public/[0-9]+/[0-9a-zA-Z]+$").unwrap()
});
static SHORT_WORD: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z]{5,10}$").unwrap());

type Check = fn(&Value) -> Result<(), String>;

fn is_short_word(v: &Value) -> bool {
    v.as_str().is_some_and(|s| SHORT_WORD.is_match(s))
}

fn is_int_in(v: &Value, lo: i64, hi: i64) -> bool {
    v.as_i64().is_some_and(|x| (lo..=hi).contains(&x))
}

fn ensure(ok: bool, what: impl FnOnce() -> String) -> Result<(), String> {
    if ok { Ok(()) } else { Err(what()) }
}

fn keys_match(out: &Value) -> Result<(), String> {
    let keys: Vec<&str> = out
        .as_object()
        .ok_or("root is not an object")?
        .keys()
        .map(String::as_str)
        .collect();
    ensure(keys == TOP_LEVEL_KEYS, || format!("unexpected keys {keys:?}"))
}

fn scalars_in_range(out: &Value) -> Result<(), String> {
    ensure(is_short_word(&out["title"]), || format!("title {}", out["title"]))?;
    ensure(is_short_word(&out["description"]), || format!("description {}", out["description"]))?;
    ensure(is_int_in(&out["startDate"], 0, 100), || format!("startDate {}", out["startDate"]))?;
    ensure(is_int_in(&out["endDate"], 0, 100), || format!("endDate {}", out["endDate"]))?;
    ensure(out["readOnly"].is_boolean(), || format!("readOnly {}", out["readOnly"]))
}

fn unions_pick_one_branch(out: &Value) -> Result<(), String> {
    let id = &out["id"];
    ensure(is_short_word(id) || is_int_in(id, 0, 100), || format!("id {id}"))?;
    let parent = &out["parentId"];
    ensure(parent.is_null() || is_short_word(parent) || is_int_in(parent, 0, 100), || format!("parentId {parent}"))?;
    let prior = &out["priorProbability"];
    ensure(prior.is_null() || is_int_in(prior, 0, 100), || format!("priorProbability {prior}"))?;
    let external = &out["externalId"];
    ensure(external.is_null() || is_short_word(external), || format!("externalId {external}"))
}

fn process_url_matches(out: &Value) -> Result<(), String> {
    match &out["process"] {
        Value::Null => Ok(()),
        Value::String(url) => ensure(PROCESS_URL.is_match(url), || format!("process url {url}")),
        other => Err(format!("process {other}")),
    }
}

fn attendee_reference_resolves(out: &Value) -> Result<(), String> {
    let attendees = out["attendees"].as_array().ok_or("attendees is not an array")?;
    ensure(attendees.len() == 1, || format!("{} attendees", attendees.len()))?;
    let attendee = &attendees[0];
    ensure(is_int_in(&attendee["userId"], 0, 100), || format!("userId {}", attendee["userId"]))?;
    let access = ["view", "modify", "sign", "execute"].map(Value::from);
    ensure(access.contains(&attendee["access"]), || format!("access {}", attendee["access"]))?;
    let form_access = ["view", "execute", "execute_view"].map(Value::from);
    ensure(form_access.contains(&attendee["formAccess"]), || format!("formAccess {}", attendee["formAccess"]))
}

fn untyped_containers_are_empty(out: &Value) -> Result<(), String> {
    ensure(out["tags"] == json!([]), || format!("tags {}", out["tags"]))?;
    ensure(out["formValue"] == json!({}), || format!("formValue {}", out["formValue"]))?;
    ensure(out["form"]["viewModel"] == json!({}), || format!("form {}", out["form"]))
}

fn nested_object_resolves(out: &Value) -> Result<(), String> {
    ensure(is_int_in(&out["form"]["id"], 0, 100), || format!("form {}", out["form"]))
}

const CHECKS: [(&str, Check); 7] = [
    ("top-level keys", keys_match),
    ("scalars in range", scalars_in_range),
    ("anyOf picks one branch", unions_pick_one_branch),
    ("pattern synthesis", process_url_matches),
    ("$ref resolution", attendee_reference_resolves),
    ("untyped containers", untyped_containers_are_empty),
    ("nested object", nested_object_resolves),
];

fn main() {
    let schema: Value = serde_json::from_str(MEETING_SCHEMA).expect("fixture is valid JSON");
    let seed: u64 = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or_else(|| rand::thread_rng().r#gen());
    eprintln!("—— meeting schema, {ROUNDS} rounds, seed {seed} ——");

    let mut synth = Synthesizer::seeded(seed);
    let outputs: Vec<Option<Value>> = synth.generate_many(&schema, ROUNDS);

    let mut failed = 0;
    for (name, check) in CHECKS {
        let first_error = outputs.iter().find_map(|out| match out {
            Some(out) => check(out).err(),
            None => Some("no value produced".to_owned()),
        });
        match first_error {
            None => eprintln!("{name} => {}", "PASS".green()),
            Some(error) => {
                failed += 1;
                eprintln!("{name} => {} ({error})", "FAIL".red());
            }
        }
    }

    let empty = json_mock::generate(&Value::Null);
    if empty.is_none() {
        eprintln!("empty input => {}", "PASS".green());
    } else {
        failed += 1;
        eprintln!("empty input => {} ({empty:?})", "FAIL".red());
    }

    if failed > 0 {
        std::process::exit(1);
    }
}
