use capture_core::{AppViewModel, DisplayMode, Msg, Shortcut};

/// What one line of terminal input asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Messages for the core, in order.
    Send(Vec<Msg>),
    /// Redraw the current screen.
    Redraw,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  <url>                       capture the address (Enter in the input box)
  capture <url>               capture the address, abandoning any job in progress
  url <text>                  edit the input without submitting
  submit                      submit the current input
  list | refresh              reload the capture list
  compare <n|folder>          compare a capture with its original page
  mode split|original|captured
  open                        open the captured page in a separate tab
  esc | back                  leave the comparison
  view <n|folder>             open a capture full screen
  download <n|folder>         download a capture archive
  screenshot <n|folder>       open the screenshot taken during capture
  delete <n|folder>           delete a capture (asks for confirmation)
  yes | no                    answer a delete confirmation
  dismiss                     dismiss the current notice
  help                        show this help
  quit                        leave";

/// Maps a line of input to a [`Command`].
///
/// Captures may be referenced by their 1-based position in the rendered list
/// or by folder name.
pub fn parse_line(line: &str, view: &AppViewModel) -> Result<Command, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(Command::Redraw);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let send = |msgs: Vec<Msg>| -> Result<Command, String> { Ok(Command::Send(msgs)) };
    match word.to_ascii_lowercase().as_str() {
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" | "q" => Ok(Command::Quit),
        "capture" => {
            if rest.is_empty() {
                send(vec![Msg::CaptureClicked])
            } else {
                send(vec![Msg::InputChanged(rest.to_string()), Msg::CaptureClicked])
            }
        }
        "url" => send(vec![Msg::InputChanged(rest.to_string())]),
        "submit" => send(vec![Msg::ShortcutPressed(Shortcut::Submit)]),
        "list" | "refresh" => send(vec![Msg::RefreshClicked]),
        "compare" => {
            let folder = resolve_capture(rest, view, "compare")?;
            send(vec![Msg::CompareClicked { folder }])
        }
        "view" => {
            let folder = resolve_capture(rest, view, "view")?;
            send(vec![Msg::ViewClicked { folder }])
        }
        "download" => {
            let folder = resolve_capture(rest, view, "download")?;
            send(vec![Msg::DownloadClicked { folder }])
        }
        "screenshot" => {
            let folder = resolve_capture(rest, view, "screenshot")?;
            send(vec![Msg::ScreenshotClicked { folder }])
        }
        "delete" => {
            let folder = resolve_capture(rest, view, "delete")?;
            send(vec![Msg::DeleteClicked { folder }])
        }
        "yes" | "y" => send(vec![Msg::DeleteConfirmed]),
        "no" | "n" => send(vec![Msg::DeleteCancelled]),
        "mode" => send(vec![Msg::ModeSelected(parse_mode(rest)?)]),
        "split" | "original" | "captured" => send(vec![Msg::ModeSelected(parse_mode(word)?)]),
        "open" => send(vec![Msg::OpenInNewTabClicked]),
        "esc" | "back" => send(vec![Msg::ShortcutPressed(Shortcut::Escape)]),
        "dismiss" | "ok" => send(vec![Msg::NoticeDismissed]),
        // Anything else is typed into the input box and submitted with Enter.
        _ => send(vec![
            Msg::InputChanged(line.to_string()),
            Msg::ShortcutPressed(Shortcut::Submit),
        ]),
    }
}

fn parse_mode(text: &str) -> Result<DisplayMode, String> {
    match text.to_ascii_lowercase().as_str() {
        "split" => Ok(DisplayMode::Split),
        "original" => Ok(DisplayMode::Original),
        "captured" => Ok(DisplayMode::Captured),
        _ => Err("usage: mode split|original|captured".to_string()),
    }
}

fn resolve_capture(arg: &str, view: &AppViewModel, verb: &str) -> Result<String, String> {
    if arg.is_empty() {
        return Err(format!("usage: {verb} <number|folder>"));
    }
    match arg.parse::<usize>() {
        Ok(index) => index
            .checked_sub(1)
            .and_then(|i| view.captures.get(i))
            .map(|record| record.folder_name.clone())
            .ok_or_else(|| format!("no capture #{index}")),
        Err(_) => Ok(arg.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_line, Command};
    use capture_core::{AppViewModel, AssetCounts, CaptureRecord, DisplayMode, Msg, Shortcut};
    use pretty_assertions::assert_eq;

    fn view_with_captures() -> AppViewModel {
        AppViewModel {
            captures: vec![CaptureRecord {
                folder_name: "example_com_20240501".to_string(),
                original_url: "https://example.com".to_string(),
                final_url: None,
                capture_time: "2024-05-01T10:00:00".to_string(),
                assets: AssetCounts::default(),
            }],
            ..AppViewModel::default()
        }
    }

    #[test]
    fn bare_text_is_entered_and_submitted() {
        let command = parse_line("  https://example.com  ", &AppViewModel::default());
        assert_eq!(
            command,
            Ok(Command::Send(vec![
                Msg::InputChanged("https://example.com".to_string()),
                Msg::ShortcutPressed(Shortcut::Submit),
            ]))
        );
    }

    #[test]
    fn capture_command_clicks_the_button() {
        let command = parse_line("capture https://example.com", &AppViewModel::default());
        assert_eq!(
            command,
            Ok(Command::Send(vec![
                Msg::InputChanged("https://example.com".to_string()),
                Msg::CaptureClicked,
            ]))
        );
    }

    #[test]
    fn captures_resolve_by_position_or_folder() {
        let view = view_with_captures();
        assert_eq!(
            parse_line("compare 1", &view),
            Ok(Command::Send(vec![Msg::CompareClicked {
                folder: "example_com_20240501".to_string()
            }]))
        );
        assert_eq!(
            parse_line("delete other_folder", &view),
            Ok(Command::Send(vec![Msg::DeleteClicked {
                folder: "other_folder".to_string()
            }]))
        );
        assert_eq!(
            parse_line("screenshot 1", &view),
            Ok(Command::Send(vec![Msg::ScreenshotClicked {
                folder: "example_com_20240501".to_string()
            }]))
        );
        assert_eq!(parse_line("view 2", &view), Err("no capture #2".to_string()));
        assert_eq!(parse_line("view 0", &view), Err("no capture #0".to_string()));
        assert!(parse_line("download", &view).is_err());
    }

    #[test]
    fn mode_words_select_display_modes() {
        let view = AppViewModel::default();
        assert_eq!(
            parse_line("mode captured", &view),
            Ok(Command::Send(vec![Msg::ModeSelected(DisplayMode::Captured)]))
        );
        assert_eq!(
            parse_line("Original", &view),
            Ok(Command::Send(vec![Msg::ModeSelected(DisplayMode::Original)]))
        );
        assert!(parse_line("mode sideways", &view).is_err());
    }

    #[test]
    fn control_words() {
        let view = AppViewModel::default();
        assert_eq!(parse_line("", &view), Ok(Command::Redraw));
        assert_eq!(parse_line("help", &view), Ok(Command::Help));
        assert_eq!(parse_line("quit", &view), Ok(Command::Quit));
        assert_eq!(
            parse_line("esc", &view),
            Ok(Command::Send(vec![Msg::ShortcutPressed(Shortcut::Escape)]))
        );
        assert_eq!(
            parse_line("y", &view),
            Ok(Command::Send(vec![Msg::DeleteConfirmed]))
        );
        assert_eq!(
            parse_line("dismiss", &view),
            Ok(Command::Send(vec![Msg::NoticeDismissed]))
        );
    }
}
