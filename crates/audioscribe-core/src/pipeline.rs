//! Note-creation pipeline runner.
//!
//! Orchestrates the full pipeline against the passive session state:
//! 1. Record the uploaded audio location
//! 2. Transcribe the audio
//! 3. Generate the title and markdown content (streamed)
//! 4. Commit the completed note to the collection
//!
//! The tracker only stores progress; all sequencing lives here. A failed step
//! writes its message into the tracker's `error` field and halts — recovery is
//! a full reset. Every write-back is guarded by the session epoch so
//! completions racing a reset are dropped instead of resurrecting old state.

use tokio::sync::mpsc;

use crate::generation::GenerationGateway;
use crate::provider::TranscriptionGateway;
use crate::session::NoteSession;
use crate::store::Note;

/// Run the pipeline for one uploaded recording.
///
/// `audio_url` must be publicly reachable by the speech provider; recording
/// and upload are the UI layer's job. On success the completed note is in the
/// collection and the tracker and draft are back at defaults.
pub async fn run_pipeline(
    session: &NoteSession,
    transcription: &TranscriptionGateway,
    generation: &GenerationGateway,
    audio_url: &str,
) -> Result<(), String> {
    let epoch = session.epoch();

    session.steps().update(|mut s| {
        s.recorded = true;
        s.upload_started = true;
        s.uploaded_url = Some(audio_url.to_string());
        s.transcript_started = true;
        s
    });

    let outcome = transcription.transcribe(audio_url).await;
    if session.epoch() != epoch {
        crate::verbose!("Transcription finished after reset, dropping result");
        return Ok(());
    }

    let transcript = match (outcome.success, outcome.text) {
        (true, Some(text)) => text,
        _ => {
            let message = outcome
                .error
                .unwrap_or_else(|| "Unknown error".to_string());
            session.steps().update(|mut s| {
                s.error = Some(message.clone());
                s
            });
            return Err(message);
        }
    };

    session.steps().update(|mut s| {
        s.transcript = Some(transcript.clone());
        s
    });
    session.draft().update(|mut d| {
        d.transcript = Some(transcript.clone());
        d
    });

    session.steps().update(|mut s| {
        s.generation_started = true;
        s
    });

    let (tx, mut rx) = mpsc::unbounded_channel();
    let generate = generation.generate(&transcript, Some(tx));
    let drain = async {
        while let Some(delta) = rx.recv().await {
            if session.epoch() != epoch {
                continue;
            }
            session.steps().update(|mut s| {
                s.streaming_started = true;
                s
            });
            session.draft().update(|mut d| {
                let mut content = d.content.take().unwrap_or_default();
                content.push_str(&delta);
                d.content = Some(content);
                d
            });
        }
    };
    let (outcome, ()) = tokio::join!(generate, drain);

    if session.epoch() != epoch {
        crate::verbose!("Generation finished after reset, dropping result");
        return Ok(());
    }

    let (title, content) = match (outcome.success, outcome.title, outcome.content) {
        (true, Some(title), Some(content)) => (title, content),
        _ => {
            let message = outcome
                .error
                .unwrap_or_else(|| "Unknown error".to_string());
            session.steps().update(|mut s| {
                s.error = Some(message.clone());
                s
            });
            return Err(message);
        }
    };

    session.steps().update(|mut s| {
        s.streaming_finished = true;
        s
    });
    session.draft().update(|mut d| {
        d.title = Some(title.clone());
        d.content = Some(content.clone());
        d
    });

    session.notes().update(|mut notes| {
        notes.push(Note::new(title, transcript, content));
        notes
    });

    session.reset_pipeline();
    Ok(())
}
