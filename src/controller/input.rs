//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};

use crate::model::FocusPane;
use crate::router::PageKind;

use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // An error toast blocks other interactions until dismissed.
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Help popup.
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('?') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        // Track picker modal.
        if model.is_track_picker_open().await {
            return match key.code {
                KeyCode::Up => {
                    model.track_picker_move(-1).await;
                    Ok(())
                }
                KeyCode::Down => {
                    model.track_picker_move(1).await;
                    Ok(())
                }
                KeyCode::Enter => {
                    let index = model.track_picker_selection().await;
                    model.hide_track_picker().await;
                    drop(model);
                    self.select_track(index).await;
                    Ok(())
                }
                KeyCode::Esc | KeyCode::Char('m') => {
                    model.hide_track_picker().await;
                    Ok(())
                }
                _ => Ok(()),
            };
        }

        let ui_state = model.get_ui_state().await;
        let page = model.current_page().await;

        // The login page only answers Enter and quit.
        if page == Some(PageKind::Login) {
            match key.code {
                KeyCode::Enter => {
                    drop(model);
                    self.login().await;
                    return Ok(());
                }
                KeyCode::Char('q') => {
                    model.set_should_quit(true).await;
                    return Ok(());
                }
                _ => return Ok(()),
            }
        }

        // Focused-pane navigation.
        if ui_state.focus == FocusPane::Dock {
            match key.code {
                KeyCode::Up => {
                    model.dock_move(-1).await;
                    return Ok(());
                }
                KeyCode::Down => {
                    model.dock_move(1).await;
                    return Ok(());
                }
                KeyCode::Enter => {
                    drop(model);
                    self.open_dock_selection().await;
                    return Ok(());
                }
                _ => {}
            }
        } else {
            match page {
                Some(PageKind::Files) => match key.code {
                    KeyCode::Up => {
                        model.files_move(-1).await;
                        return Ok(());
                    }
                    KeyCode::Down => {
                        model.files_move(1).await;
                        return Ok(());
                    }
                    KeyCode::Enter => {
                        drop(model);
                        self.open_selected_file().await;
                        return Ok(());
                    }
                    KeyCode::Char('u') => {
                        drop(model);
                        self.files_up_or_back().await;
                        return Ok(());
                    }
                    KeyCode::Char('v') => {
                        model.toggle_view_mode().await;
                        return Ok(());
                    }
                    _ => {}
                },
                Some(PageKind::Home) => match key.code {
                    KeyCode::Up => {
                        model.home_move(-1).await;
                        return Ok(());
                    }
                    KeyCode::Down => {
                        model.home_move(1).await;
                        return Ok(());
                    }
                    KeyCode::Enter => {
                        drop(model);
                        self.open_selected_favorite().await;
                        return Ok(());
                    }
                    _ => {}
                },
                _ => {}
            }
        }

        // Global keybindings.
        match key.code {
            KeyCode::Char('q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab => {
                model.cycle_focus().await;
            }
            KeyCode::Esc | KeyCode::Backspace => {
                drop(model);
                self.history_back().await;
            }
            KeyCode::Char('f') => {
                drop(model);
                self.history_forward().await;
            }
            KeyCode::Char(c @ '1'..='5') => {
                let index = (c as usize) - ('1' as usize);
                drop(model);
                let path = crate::model::DOCK_ITEMS[index].1;
                self.navigate(path).await;
            }
            // Play/pause toggle
            KeyCode::Char(' ') => {
                drop(model);
                self.toggle_play_pause().await;
            }
            // Next / previous track
            KeyCode::Char('n') => {
                drop(model);
                self.next_track().await;
            }
            KeyCode::Char('p') => {
                drop(model);
                self.previous_track().await;
            }
            // Seek
            KeyCode::Char('.') => {
                drop(model);
                self.seek_forward().await;
            }
            KeyCode::Char(',') => {
                drop(model);
                self.seek_backward().await;
            }
            // Volume
            KeyCode::Char('+') | KeyCode::Char('=') => {
                drop(model);
                self.volume_up().await;
            }
            KeyCode::Char('-') => {
                drop(model);
                self.volume_down().await;
            }
            // Track picker
            KeyCode::Char('m') => {
                model.open_track_picker().await;
            }
            // Sign out
            KeyCode::Char('o') => {
                drop(model);
                self.logout().await;
            }
            // Help
            KeyCode::Char('h') | KeyCode::Char('?') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
