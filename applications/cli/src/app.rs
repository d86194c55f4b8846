/// Command handlers
///
/// `App` wires the backend client, the persisted store, and the playback
/// controller together for one CLI invocation.
use crate::config::CliConfig;
use crate::error::{CliError, Result};
use std::io::BufRead;
use std::sync::Arc;
use std::time::Instant;
use sunohub_catalog::{BackendConfig, SupabaseClient};
use sunohub_core::share::{render_share_page, share_url};
use sunohub_core::{Catalog, KeyValueStore, Song, SongId, SortFilter};
use sunohub_importer::Importer;
use sunohub_playback::lyrics::{
    active_line_index, has_timestamps, parse_lyrics, LyricSyncSession,
};
use sunohub_playback::{Navigation, PlaybackController};
use sunohub_storage::FileStore;
use tracing::{debug, info};

/// Song the CLI last started, kept next to the player state.
///
/// The controller's position is not persisted, so this anchors both
/// catalog roaming and the queue cursor across invocations.
pub const KEY_NOW_PLAYING: &str = "cli_now_playing";

/// `OneCustom` replays already done for the current song, handed back to
/// the controller on the next invocation.
pub const KEY_PLAY_COUNT: &str = "cli_play_count";

pub struct App {
    config: CliConfig,
    client: SupabaseClient,
    store: Arc<FileStore>,
    controller: PlaybackController,
}

impl App {
    /// Connect to the backend and restore player state
    pub fn open(config: CliConfig) -> Result<Self> {
        let backend = match &config.backend.access_token {
            Some(token) => BackendConfig::with_access_token(
                config.backend.url.clone(),
                config.backend.anon_key.clone(),
                token.clone(),
            ),
            None => BackendConfig::new(config.backend.url.clone(), config.backend.anon_key.clone()),
        };
        let client = SupabaseClient::new(backend)?;

        let store = Arc::new(FileStore::open(&config.storage.state_path)?);
        let catalog: Arc<dyn Catalog> = Arc::new(client.clone());
        let play_count = store
            .get(KEY_PLAY_COUNT)?
            .and_then(|count| count.parse().ok())
            .unwrap_or(0);
        let mut controller = PlaybackController::restore(Box::new(Arc::clone(&store)), catalog)?
            .with_play_count(play_count);

        if let Some(now_playing) = store.get(KEY_NOW_PLAYING)? {
            if let Some(index) = queue_index_of(controller.queue(), &now_playing) {
                controller.play_from_queue(index);
            }
        }

        debug!(state = %config.storage.state_path.display(), "App ready");
        Ok(Self {
            config,
            client,
            store,
            controller,
        })
    }

    pub fn controller(&self) -> &PlaybackController {
        &self.controller
    }

    // ===== Feed =====

    pub async fn feed(&self, sort: SortFilter, artist: Option<&str>) -> Result<()> {
        let user_id = self.config.backend.user_id.as_deref();
        if sort == SortFilter::Mine && user_id.is_none() {
            return Err(CliError::SignInRequired("set backend.user_id to list your songs"));
        }

        let songs = self.client.get_song_feed(sort, artist, user_id).await?;
        if songs.is_empty() {
            println!("No songs.");
        }
        for song in &songs {
            println!("{}", song_line(song));
        }
        Ok(())
    }

    pub async fn song(&self, id: &SongId) -> Result<()> {
        let song = self.fetch_song(id).await?;
        println!("{}", song_line(&song));
        if let Some(category) = &song.category {
            println!("Category: {}", category);
        }
        if !song.tags.is_empty() {
            println!("Tags: {}", song.tags.join(", "));
        }
        println!("Audio: {}", song.audio_url);

        let reviews = self.client.get_reviews(id).await?;
        if !reviews.is_empty() {
            println!();
            println!("Reviews ({}):", reviews.len());
            for review in reviews {
                let who = review.user_email.as_deref().unwrap_or(&review.user_id);
                println!(
                    "  {} {}  {}",
                    stars(review.rating),
                    who,
                    review.comment.as_deref().unwrap_or("")
                );
            }
        }
        Ok(())
    }

    // ===== Import =====

    pub async fn import(&mut self, link: &str, publish: bool, queue: bool) -> Result<()> {
        let imported = Importer::new()?.fetch_song(link).await?;
        println!("Imported: {} by {} ({})", imported.title, imported.artist, imported.suno_id);

        let mut song = imported.into_song();
        if publish {
            let user_id = self
                .config
                .backend
                .user_id
                .as_deref()
                .ok_or(CliError::SignInRequired("set backend.user_id to publish"))?;
            if self.config.backend.access_token.is_none() {
                return Err(CliError::SignInRequired("set backend.access_token to publish"));
            }

            song = self.client.publish_song(&song, user_id).await?;
            if let Some(id) = &song.id {
                println!("Published as {}", id);
                println!("{}", share_url(&self.config.app.base_url, id.as_str()));
            }
        }

        if queue {
            let added = self.controller.add_to_queue(song)?;
            println!("{}", if added { "Queued." } else { "Already queued." });
        }
        Ok(())
    }

    // ===== Queue =====

    pub async fn queue_add(&mut self, id: &SongId) -> Result<()> {
        let song = self.fetch_song(id).await?;
        let title = song.title.clone();
        if self.controller.add_to_queue(song)? {
            println!("Queued: {}", title);
        } else {
            println!("Already queued: {}", title);
        }
        Ok(())
    }

    pub fn queue_remove(&mut self, id: &str) -> Result<()> {
        if self.controller.remove_from_queue(id)? {
            println!("Removed.");
        } else {
            println!("Not in queue.");
        }
        Ok(())
    }

    pub fn queue_clear(&mut self) -> Result<()> {
        self.controller.clear_queue()?;
        println!("Queue cleared.");
        Ok(())
    }

    pub fn queue_list(&self) {
        let queue = self.controller.queue();
        if queue.is_empty() {
            println!("Queue is empty; next/prev roam the whole catalog.");
            return;
        }
        for (index, song) in queue.iter().enumerate() {
            let marker = if self.controller.position() == Some(index) {
                ">"
            } else {
                " "
            };
            println!("{} {:>3}  {}", marker, index, song_line(song));
        }
        println!(
            "shuffle: {}  repeat: {}",
            on_off(self.controller.is_shuffle()),
            self.controller.repeat_mode()
        );
    }

    pub async fn queue_play(&mut self, index: usize) -> Result<()> {
        if !self.controller.play_from_queue(index) {
            println!("No queue entry at {}.", index);
            return Ok(());
        }
        self.controller.reset_play_count();
        self.save_play_count()?;

        match self.controller.current_song().and_then(|song| song.id.clone()) {
            Some(id) => self.start(Navigation::to(id)).await,
            None => {
                println!("Entry {} is not published yet and cannot be played.", index);
                Ok(())
            }
        }
    }

    // ===== Navigation =====

    pub async fn next(&mut self, from: Option<SongId>) -> Result<()> {
        let anchor = self.anchor(from)?;
        let mut target = None;
        self.controller
            .play_next(|nav| target = Some(nav), anchor.as_ref())
            .await?;
        self.save_play_count()?;
        self.finish_navigation(target).await
    }

    pub async fn prev(&mut self, from: Option<SongId>) -> Result<()> {
        let anchor = self.anchor(from)?;
        let mut target = None;
        self.controller
            .play_prev(|nav| target = Some(nav), anchor.as_ref())
            .await?;
        self.save_play_count()?;
        self.finish_navigation(target).await
    }

    pub fn toggle_shuffle(&mut self) -> Result<()> {
        let shuffle = self.controller.toggle_shuffle()?;
        println!("Shuffle {}", on_off(shuffle));
        Ok(())
    }

    pub fn toggle_repeat(&mut self) -> Result<()> {
        let repeat = self.controller.toggle_repeat()?;
        self.save_play_count()?;
        println!("Repeat {}", repeat);
        Ok(())
    }

    // ===== Lyrics / Share =====

    pub async fn lyrics(&self, id: &SongId, at: Option<f64>) -> Result<()> {
        let song = self.fetch_song(id).await?;
        let Some(text) = song.lyrics.as_deref().filter(|t| !t.trim().is_empty()) else {
            println!("No lyrics.");
            return Ok(());
        };

        let lines = parse_lyrics(text, f64::from(song.duration));
        let active = at.map(|position| active_line_index(&lines, position));
        if !has_timestamps(text) {
            println!("(unsynced lyrics, timings estimated)");
        }
        for (index, line) in lines.iter().enumerate() {
            let marker = if active == Some(index) { ">" } else { " " };
            println!("{} {}  {}", marker, clock(line.time), line.text);
        }
        Ok(())
    }

    pub async fn share(&self, id: &SongId, html: bool) -> Result<()> {
        let song = self.fetch_song(id).await?;
        if html {
            println!("{}", render_share_page(&song, &self.config.app.base_url)?);
        } else {
            println!("{}", share_url(&self.config.app.base_url, id.as_str()));
        }
        Ok(())
    }

    /// Tap-to-sync: one line of `input` (Enter) stamps the active lyric
    /// line with the time since the session started. The result is saved
    /// as LRC once every line is stamped.
    pub async fn sync_lyrics(&self, id: &SongId, input: impl BufRead) -> Result<()> {
        let song = self.fetch_song(id).await?;
        let Some(mut session) = song.lyrics.as_deref().and_then(LyricSyncSession::start) else {
            println!("No lyrics to sync.");
            return Ok(());
        };

        println!("Start the song and press Enter as each line begins.");
        let started = Instant::now();
        let mut taps = input.lines();
        while !session.is_complete() {
            println!("  {}", session.lines()[session.active_index()].text);
            match taps.next() {
                Some(tap) => {
                    tap.map_err(sunohub_core::SunoHubError::from)?;
                    session.mark(started.elapsed().as_secs_f64());
                }
                None => {
                    println!("Sync abandoned, lyrics unchanged.");
                    return Ok(());
                }
            }
        }

        self.client.update_song_lyrics(id, &session.to_lrc()).await?;
        info!(song_id = %id, lines = session.lines().len(), "Lyrics synced");
        println!("Saved {} timed lines.", session.lines().len());
        Ok(())
    }

    // ===== Reviews / Admin =====

    pub async fn review(&self, id: &SongId, rating: u8, comment: Option<&str>) -> Result<()> {
        let user_id = self
            .config
            .backend
            .user_id
            .as_deref()
            .ok_or(CliError::SignInRequired("set backend.user_id to review"))?;

        self.client
            .submit_review(id, user_id, self.config.backend.user_email.as_deref(), rating, comment)
            .await?;
        println!("Reviewed {} {}", id, stars(rating));
        Ok(())
    }

    pub async fn delete_review(&self, review_id: &str) -> Result<()> {
        self.client.delete_review(review_id).await?;
        println!("Review deleted.");
        Ok(())
    }

    /// Delete songs from the feed and drop them from the local queue
    pub async fn delete(&mut self, ids: &[SongId]) -> Result<()> {
        match ids {
            [] => return Ok(()),
            [id] => self.client.delete_song(id).await?,
            _ => self.client.delete_songs(ids).await?,
        }

        for id in ids {
            self.controller.remove_from_queue(id.as_str())?;
        }
        println!("Deleted {} song(s).", ids.len());
        Ok(())
    }

    pub async fn rename_artist(&self, from: &str, to: &str) -> Result<()> {
        let count = self.client.bulk_update_artist_name(from, to).await?;
        println!("Renamed {} song(s) from {} to {}.", count, from, to);
        Ok(())
    }

    // ===== Helpers =====

    fn save_play_count(&self) -> Result<()> {
        self.store
            .set(KEY_PLAY_COUNT, &self.controller.play_count().to_string())?;
        Ok(())
    }

    async fn fetch_song(&self, id: &SongId) -> Result<Song> {
        self.client
            .get_song_by_id(id)
            .await?
            .ok_or_else(|| CliError::SongNotFound(id.to_string()))
    }

    /// Explicit `--from`, else whatever this CLI last started
    fn anchor(&self, from: Option<SongId>) -> Result<Option<SongId>> {
        match from {
            Some(id) => Ok(Some(id)),
            None => Ok(self.store.get(KEY_NOW_PLAYING)?.map(SongId::from)),
        }
    }

    async fn finish_navigation(&mut self, target: Option<Navigation>) -> Result<()> {
        match target {
            Some(nav) => self.start(nav).await,
            None => {
                println!("Nothing to play.");
                Ok(())
            }
        }
    }

    /// Remember the song and count a play, as opening its page would
    async fn start(&mut self, nav: Navigation) -> Result<()> {
        self.store.set(KEY_NOW_PLAYING, nav.song_id.as_str())?;
        if !nav.restart {
            self.client.increment_plays(&nav.song_id).await?;
        }

        let song = self.fetch_song(&nav.song_id).await?;
        let verb = if nav.restart { "Replaying" } else { "Now playing" };
        println!("{}: {}", verb, song_line(&song));
        info!(song_id = %nav.song_id, restart = nav.restart, "Playback moved");
        Ok(())
    }
}

fn queue_index_of(queue: &[Song], id: &str) -> Option<usize> {
    queue
        .iter()
        .position(|song| song.id.as_ref().is_some_and(|song_id| song_id.as_str() == id))
}

/// One-line summary used by every listing
pub fn song_line(song: &Song) -> String {
    let id = song.id.as_ref().map_or("-", SongId::as_str);
    let mut line = format!("{}  {} by {}", id, song.title, song.artist);
    if let Some(plays) = song.plays_count {
        line.push_str(&format!("  plays:{}", plays));
    }
    if let Some(rating) = song.average_rating {
        line.push_str(&format!("  rating:{:.1}", rating));
    }
    line
}

fn stars(rating: u8) -> String {
    let filled = usize::from(rating.min(5));
    format!("{}{}", "*".repeat(filled), ".".repeat(5 - filled))
}

/// `mm:ss.xx`
pub fn clock(seconds: f64) -> String {
    let seconds = seconds.max(0.0);
    format!("{:02}:{:05.2}", (seconds / 60.0).floor() as u64, seconds % 60.0)
}

fn on_off(flag: bool) -> &'static str {
    if flag {
        "on"
    } else {
        "off"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_song_line() {
        let mut song = Song::new("suno-1", "Night Drive", "Luna").with_id(SongId::new("a"));
        assert_eq!(song_line(&song), "a  Night Drive by Luna");

        song.plays_count = Some(12);
        song.average_rating = Some(4.5);
        assert_eq!(song_line(&song), "a  Night Drive by Luna  plays:12  rating:4.5");

        let draft = Song::new("suno-2", "Draft", "Luna");
        assert!(song_line(&draft).starts_with("-  Draft"));
    }

    #[test]
    fn test_clock() {
        assert_eq!(clock(0.0), "00:00.00");
        assert_eq!(clock(62.5), "01:02.50");
    }

    #[test]
    fn test_stars() {
        assert_eq!(stars(3), "***..");
        assert_eq!(stars(5), "*****");
    }

    #[test]
    fn test_queue_index_of() {
        let queue = vec![
            Song::new("s-1", "One", "A"),
            Song::new("s-2", "Two", "A").with_id(SongId::new("b")),
        ];
        assert_eq!(queue_index_of(&queue, "b"), Some(1));
        assert_eq!(queue_index_of(&queue, "s-1"), None);
    }
}
