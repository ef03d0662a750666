use jobboard_core::{Field, JobId, Msg, Toggle};

/// One line of user input, parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Dispatch(Msg),
    Help,
    ShowUrl,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search <text>          search title, company and location (empty clears)
  set <key> <value>      set a filter, e.g. `set remote Remote`
  unset <key>            reset one filter to its default
  toggle <name>          flip a quick toggle: jobs, easy, date, experience
  reset                  clear every filter, keep the search
  sheet | close          open or close the filter sheet (loads saved filters)
  save                   save the current filters as preferences
  ok                     dismiss a save error
  next | prev | page <n> move between pages
  open <id>              mark a listing as viewed
  dismiss <id>           hide a listing for good
  url                    print the shareable query string
  help | quit";

pub fn parse_line(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let msg = match verb.to_ascii_lowercase().as_str() {
        "help" | "?" => return Ok(Some(Command::Help)),
        "quit" | "exit" | "q" => return Ok(Some(Command::Quit)),
        "url" => return Ok(Some(Command::ShowUrl)),
        "search" | "s" => Msg::SearchSubmitted(rest.to_string()),
        "set" => {
            let (key, value) = rest
                .split_once(char::is_whitespace)
                .ok_or_else(|| "usage: set <key> <value>".to_string())?;
            match parse_field(key)? {
                // Goes through the search box so it lands in recent searches.
                Field::Search => Msg::SearchSubmitted(value.trim().to_string()),
                field => Msg::FilterChanged {
                    field,
                    value: value.trim().to_string(),
                },
            }
        }
        "unset" => Msg::FilterCleared(parse_field(rest)?),
        "toggle" | "t" => Msg::ToggleClicked(parse_toggle(rest)?),
        "reset" => Msg::FiltersReset,
        "sheet" | "filters" => Msg::FilterSheetOpened,
        "close" => Msg::FilterSheetClosed,
        "save" => Msg::SaveFiltersClicked,
        "ok" => Msg::SaveErrorDismissed,
        "next" | "n" => Msg::NextPage,
        "prev" | "p" => Msg::PrevPage,
        "page" => Msg::PageRequested(parse_number(rest)?),
        "open" => Msg::JobOpened(parse_number::<JobId>(rest)?),
        "dismiss" => Msg::JobDismissed(parse_number::<JobId>(rest)?),
        other => return Err(format!("unknown command '{other}', try `help`")),
    };
    Ok(Some(Command::Dispatch(msg)))
}

fn parse_field(raw: &str) -> Result<Field, String> {
    Field::from_key(raw).ok_or_else(|| {
        let keys: Vec<_> = Field::ALL.iter().map(|field| field.key()).collect();
        format!("unknown filter '{raw}', expected one of: {}", keys.join(", "))
    })
}

fn parse_toggle(raw: &str) -> Result<Toggle, String> {
    let folded: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    match folded.as_str() {
        "jobs" => Ok(Toggle::Jobs),
        "easy" | "easyapply" => Ok(Toggle::EasyApply),
        "date" | "dateposted" => Ok(Toggle::DatePosted),
        "experience" | "experiencelevel" => Ok(Toggle::ExperienceLevel),
        _ => Err(format!(
            "unknown toggle '{raw}', expected jobs, easy, date or experience"
        )),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str) -> Result<T, String> {
    raw.parse()
        .map_err(|_| format!("expected a number, got '{raw}'"))
}
