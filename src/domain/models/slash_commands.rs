#[cfg(test)]
#[path = "slash_commands_test.rs"]
mod tests;

pub struct SlashCommand {
    command: String,
    pub args: Vec<String>,
}

impl SlashCommand {
    pub fn parse(text: &str) -> Option<SlashCommand> {
        let mut args = text
            .trim()
            .split(' ')
            .map(|e| return e.to_string())
            .collect::<Vec<String>>();
        let prefix = args[0].to_string();
        args.remove(0);

        let cmd = SlashCommand {
            command: prefix,
            args,
        };
        if cmd.is_quit()
            || cmd.is_upload()
            || cmd.is_documents()
            || cmd.is_new_session()
            || cmd.is_help()
        {
            return Some(cmd);
        }

        return None;
    }

    pub fn is_quit(&self) -> bool {
        return ["/q", "/quit", "/exit"].contains(&self.command.as_str());
    }

    pub fn is_upload(&self) -> bool {
        return ["/u", "/upload"].contains(&self.command.as_str());
    }

    pub fn is_documents(&self) -> bool {
        return ["/d", "/docs", "/documents"].contains(&self.command.as_str());
    }

    pub fn is_new_session(&self) -> bool {
        return ["/n", "/new"].contains(&self.command.as_str());
    }

    pub fn is_help(&self) -> bool {
        return ["/h", "/help"].contains(&self.command.as_str());
    }

    /// File path passed to `/upload`, which may contain spaces and may be
    /// wrapped in quotes.
    pub fn path_arg(&self) -> Option<String> {
        let path = self
            .args
            .iter()
            .filter(|e| return !e.is_empty())
            .cloned()
            .collect::<Vec<String>>()
            .join(" ");

        let path = path.trim_matches(|c| return c == '"' || c == '\'');
        if path.is_empty() {
            return None;
        }

        return Some(path.to_string());
    }
}
