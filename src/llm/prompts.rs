/// Build a deterministic minutes prompt for a dated transcript.
///
/// The transcript is embedded verbatim, with no escaping or truncation; the
/// completion model sees exactly what the caller sent.
pub fn build_minutes_prompt(date: &str, transcript: &str) -> String {
    format!(
        "You are an assistant that writes structured meeting minutes.\n\
Meeting date: {date}\n\
\n\
Return a meeting-minutes document with exactly these sections:\n\
1. Attendees\n\
2. Agenda\n\
3. Decisions\n\
4. Action Items\n\
\n\
Rules:\n\
- Use only information present in the transcript.\n\
- If a section has no content, write 'None'.\n\
- Keep each item short and concrete.\n\
\n\
Transcript:\n\
{transcript}"
    )
}
