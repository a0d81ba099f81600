//! Simulated video player.
//!
//! A terminal has no video surface, so each video post gets a small tokio
//! task that models a player: it buffers briefly after `play`, advances a
//! position clock while playing, and reports progress, end-of-stream and
//! failures back to the event loop as [`AppEvent::Playback`].
//!
//! The task lives as long as its [`PlayerHandle`]; dropping the handle closes
//! the command channel and the task exits.

use super::coordinator::MediaHandle;
use crate::app::AppEvent;
use crate::feed::Post;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, MissedTickBehavior};

/// Time between `play` and the first frame.
pub const STARTUP_DELAY: Duration = Duration::from_millis(150);

/// Position clock resolution.
pub const TICK: Duration = Duration::from_millis(250);

/// Length assumed for videos without a known duration.
pub const DEFAULT_DURATION_SECS: u32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PlayerCommand {
    /// Start or resume, tagged with the handle's play count.
    Play(u64),
    Pause,
}

/// What a player reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayerReportKind {
    /// First frame after buffering.
    Started,
    Progress { position_secs: u32, duration_secs: u32 },
    Ended,
    Failed(String),
}

/// A report from one player, tagged with the session and post it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerReport {
    pub session: usize,
    pub post_id: String,
    /// Which `play` call this report belongs to. Reports from an earlier play
    /// are stale once the handle has been played again.
    pub generation: u64,
    pub kind: PlayerReportKind,
}

/// Handle to a running player task.
pub struct PlayerHandle {
    post_id: String,
    commands: mpsc::UnboundedSender<PlayerCommand>,
    playing: Arc<AtomicBool>,
    plays: u64,
}

impl PlayerHandle {
    fn send(&self, cmd: PlayerCommand) {
        if self.commands.send(cmd).is_err() {
            tracing::debug!(post_id = %self.post_id, ?cmd, "Player task gone, dropping command");
        }
    }
}

impl MediaHandle for PlayerHandle {
    fn play(&mut self) {
        self.plays += 1;
        self.send(PlayerCommand::Play(self.plays));
    }

    fn pause(&mut self) {
        self.send(PlayerCommand::Pause);
    }

    fn is_playing(&self) -> bool {
        self.playing.load(Ordering::Relaxed)
    }

    fn play_generation(&self) -> u64 {
        self.plays
    }
}

/// Spawn a player for a video post.
///
/// Media URLs that are not http(s) make every `play` fail.
pub fn spawn_player(
    session: usize,
    post: &Post,
    event_tx: mpsc::Sender<AppEvent>,
) -> PlayerHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let playing = Arc::new(AtomicBool::new(false));

    let media_error = crate::util::validate_media_url(&post.media_url)
        .err()
        .map(|e| e.to_string());
    let task = PlayerTask {
        session,
        post_id: post.id.clone(),
        duration_ms: u64::from(post.duration_secs.unwrap_or(DEFAULT_DURATION_SECS).max(1)) * 1000,
        media_error,
        playing: Arc::clone(&playing),
        event_tx,
    };
    tokio::spawn(task.run(rx));

    PlayerHandle {
        post_id: post.id.clone(),
        commands: tx,
        playing,
        plays: 0,
    }
}

struct PlayerTask {
    session: usize,
    post_id: String,
    duration_ms: u64,
    media_error: Option<String>,
    playing: Arc<AtomicBool>,
    event_tx: mpsc::Sender<AppEvent>,
}

impl PlayerTask {
    async fn run(self, mut commands: mpsc::UnboundedReceiver<PlayerCommand>) {
        let mut ticker = tokio::time::interval(TICK);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut position_ms: u64 = 0;
        let mut generation: u64 = 0;
        // Some(t) while playback is wanted; frames start at t.
        let mut active_from: Option<Instant> = None;

        loop {
            tokio::select! {
                cmd = commands.recv() => match cmd {
                    Some(PlayerCommand::Play(play)) => {
                        generation = play;
                        if let Some(err) = &self.media_error {
                            self.playing.store(false, Ordering::Relaxed);
                            active_from = None;
                            if !self.report(generation, PlayerReportKind::Failed(err.clone())).await {
                                break;
                            }
                            continue;
                        }
                        if active_from.is_none() {
                            active_from = Some(Instant::now() + STARTUP_DELAY);
                        }
                    }
                    Some(PlayerCommand::Pause) => {
                        active_from = None;
                        self.playing.store(false, Ordering::Relaxed);
                    }
                    None => break,
                },

                _ = ticker.tick(), if active_from.is_some() => {
                    let Some(start) = active_from else { continue };
                    if Instant::now() < start {
                        continue;
                    }
                    if !self.playing.swap(true, Ordering::Relaxed)
                        && !self.report(generation, PlayerReportKind::Started).await
                    {
                        break;
                    }

                    position_ms = (position_ms + TICK.as_millis() as u64).min(self.duration_ms);
                    if position_ms >= self.duration_ms {
                        position_ms = 0;
                        active_from = None;
                        self.playing.store(false, Ordering::Relaxed);
                        if !self.report(generation, PlayerReportKind::Ended).await {
                            break;
                        }
                        continue;
                    }

                    let progress = PlayerReportKind::Progress {
                        position_secs: (position_ms / 1000) as u32,
                        duration_secs: (self.duration_ms / 1000) as u32,
                    };
                    if !self.report(generation, progress).await {
                        break;
                    }
                }
            }
        }

        self.playing.store(false, Ordering::Relaxed);
        tracing::debug!(post_id = %self.post_id, "Player task exited");
    }

    /// Returns false once the event loop is gone.
    async fn report(&self, generation: u64, kind: PlayerReportKind) -> bool {
        let event = AppEvent::Playback(PlayerReport {
            session: self.session,
            post_id: self.post_id.clone(),
            generation,
            kind,
        });
        if let Err(e) = self.event_tx.send(event).await {
            tracing::debug!(error = %e, post_id = %self.post_id, "Player report dropped (receiver gone)");
            return false;
        }
        true
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{Category, MediaType};

    fn video(id: &str, url: &str, duration_secs: Option<u32>) -> Post {
        Post {
            id: id.to_string(),
            user_name: "Amit Saxena".to_string(),
            user_avatar_url: String::new(),
            media_type: MediaType::Video,
            media_url: url.to_string(),
            thumbnail_url: None,
            duration_secs,
            date: "7th July".to_string(),
            location: String::new(),
            views: 0,
            caption: String::new(),
            category: Category::News,
        }
    }

    async fn next_report(rx: &mut mpsc::Receiver<AppEvent>) -> PlayerReport {
        match rx.recv().await {
            Some(AppEvent::Playback(report)) => report,
            other => panic!("expected playback report, got {:?}", other.is_some()),
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_play_starts_after_buffering() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut handle = spawn_player(2, &video("v1", "https://example.com/v.mp4", Some(10)), tx);

        handle.play();
        assert!(!handle.is_playing());

        let report = next_report(&mut rx).await;
        assert_eq!(report.session, 2);
        assert_eq!(report.post_id, "v1");
        assert_eq!(report.kind, PlayerReportKind::Started);
        assert!(handle.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_progress_advances_while_playing() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut handle = spawn_player(0, &video("v1", "https://example.com/v.mp4", Some(10)), tx);
        handle.play();

        assert_eq!(next_report(&mut rx).await.kind, PlayerReportKind::Started);
        let mut last = 0;
        for _ in 0..8 {
            if let PlayerReportKind::Progress {
                position_secs,
                duration_secs,
            } = next_report(&mut rx).await.kind
            {
                assert_eq!(duration_secs, 10);
                assert!(position_secs >= last);
                last = position_secs;
            }
        }
        assert_eq!(last, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_stops_reports() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut handle = spawn_player(0, &video("v1", "https://example.com/v.mp4", Some(10)), tx);
        handle.play();
        assert_eq!(next_report(&mut rx).await.kind, PlayerReportKind::Started);

        handle.pause();
        tokio::task::yield_now().await;
        // Drain anything sent before the pause landed
        tokio::time::sleep(TICK).await;
        while rx.try_recv().is_ok() {}

        tokio::time::sleep(TICK * 8).await;
        assert!(rx.try_recv().is_err());
        assert!(!handle.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_short_video_ends() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut handle = spawn_player(0, &video("v1", "https://example.com/v.mp4", Some(1)), tx);
        handle.play();

        let mut kinds = Vec::new();
        loop {
            let kind = next_report(&mut rx).await.kind;
            let done = kind == PlayerReportKind::Ended;
            kinds.push(kind);
            if done {
                break;
            }
        }
        assert_eq!(kinds.first(), Some(&PlayerReportKind::Started));
        assert_eq!(kinds.last(), Some(&PlayerReportKind::Ended));
        assert!(!handle.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_replay_after_end_bumps_generation() {
        let (tx, mut rx) = mpsc::channel(64);
        let mut handle = spawn_player(0, &video("v1", "https://example.com/v.mp4", Some(1)), tx);
        handle.play();

        let first = next_report(&mut rx).await;
        assert_eq!(first.generation, 1);
        loop {
            let report = next_report(&mut rx).await;
            assert_eq!(report.generation, 1);
            if report.kind == PlayerReportKind::Ended {
                break;
            }
        }

        handle.play();
        assert_eq!(handle.play_generation(), 2);
        let report = next_report(&mut rx).await;
        assert_eq!(report.kind, PlayerReportKind::Started);
        assert_eq!(report.generation, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_bad_media_url_fails() {
        let (tx, mut rx) = mpsc::channel(16);
        let mut handle = spawn_player(1, &video("v1", "ftp://example.com/v.mp4", None), tx);
        handle.play();

        let report = next_report(&mut rx).await;
        assert!(matches!(report.kind, PlayerReportKind::Failed(_)));
        assert!(!handle.is_playing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_handle_stops_task() {
        let (tx, mut rx) = mpsc::channel(16);
        let handle = spawn_player(0, &video("v1", "https://example.com/v.mp4", None), tx);
        drop(handle);
        // Task exits and drops its sender
        assert!(rx.recv().await.is_none());
    }
}
