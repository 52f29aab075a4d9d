use std::io;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, style::Style, Terminal};

use avastore_core::{
    catalog::list_image_assets,
    storage::{Database, ProductRepository},
    upload::{delete_product, LocalImageStore},
    AppConfig,
};
use avastore_tui::{
    app::{App, Focus, Mode},
    event::{AppEvent, EventHandler},
    input::{handle_key_event, Action},
    load_theme,
    widgets::{
        CarouselWidget, DashboardWidget, HeroWidget, PopupWidget, ProductDetailWidget,
        StatusBarWidget,
    },
};

pub async fn run(db: Arc<Database>, config: Arc<AppConfig>) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture, SetTitle("AVA Store"))?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let theme = load_theme(&config.ui.theme);
    let mut app = App::new(config.clone(), theme);

    let result = run_loop(&mut terminal, &mut app, &db).await;

    // Restore terminal even when the loop failed
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    db: &Database,
) -> Result<()> {
    if let Err(e) = load_catalog(app, db).await {
        tracing::error!(error = %e, "Failed to load catalog");
        app.set_status(format!("Load failed: {}", e));
    }

    let event_handler = EventHandler::new(app.config.ui.tick_rate_ms, app.config.ui.animation_fps);
    tracing::info!("TUI started");

    loop {
        app.frame(Instant::now());

        terminal.draw(|frame| {
            let layout = app.layout(frame.area());
            let app = &*app;

            HeroWidget::render(frame, layout.hero, app);
            CarouselWidget::render(
                frame,
                &app.logos,
                &app.theme,
                "Partners",
                CarouselWidget::asset_lines,
            );
            match app.focus {
                Focus::Dashboard => DashboardWidget::render(frame, layout.main, app),
                Focus::ProductDetail => ProductDetailWidget::render(frame, layout.main, app),
            }
            CarouselWidget::render(frame, &app.sidebar, &app.theme, "Featured", |item, theme| {
                vec![
                    (item.name.clone(), Style::default().fg(theme.foreground)),
                    (item.price.clone(), Style::default().fg(theme.price)),
                    (
                        item.short_description.clone(),
                        Style::default().fg(theme.muted),
                    ),
                ]
            });
            CarouselWidget::render(
                frame,
                &app.professionals,
                &app.theme,
                "Our Team",
                CarouselWidget::asset_lines,
            );
            StatusBarWidget::render(frame, layout.status, app);

            match &app.mode {
                Mode::DeleteConfirm(id) => {
                    let name = app
                        .products
                        .iter()
                        .find(|p| p.id == *id)
                        .map(|p| p.name.as_str())
                        .unwrap_or("Unknown");
                    PopupWidget::render_delete_confirm(frame, &app.theme, name);
                }
                Mode::Help => PopupWidget::render_help(frame, &app.theme),
                Mode::Normal => {}
            }
        })?;

        // Frame rate while carousels scroll, idle tick otherwise
        let event = if app.is_animating() {
            event_handler.next_animation()?
        } else {
            event_handler.next()?
        };

        match event {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, app);
                handle_action(app, action, db).await;
            }
            Some(AppEvent::Mouse(mouse)) => app.handle_mouse(&mouse, Instant::now()),
            Some(AppEvent::Resize(_, _)) | Some(AppEvent::Tick) | None => {}
        }

        if app.should_quit {
            break;
        }
    }

    app.logos.unmount();
    app.professionals.unmount();
    app.sidebar.unmount();
    tracing::info!("TUI stopped");
    Ok(())
}

/// Products from the database, carousel images from the assets directory
async fn load_catalog(app: &mut App, db: &Database) -> Result<()> {
    let products = ProductRepository::new(db).list_all().await?;
    app.set_products(products);

    let assets = app.config.assets_dir();
    let logos = list_image_assets(&assets.join("teamlogos"), "/images/teamlogos").await?;
    let professionals =
        list_image_assets(&assets.join("professionals"), "/images/professionals").await?;
    tracing::debug!(
        products = app.products.len(),
        logos = logos.len(),
        professionals = professionals.len(),
        "Catalog loaded"
    );
    app.set_logos(logos);
    app.set_professionals(professionals);
    Ok(())
}

/// Apply an action; storage failures become status messages
async fn handle_action(app: &mut App, action: Action, db: &Database) {
    let now = Instant::now();
    match action {
        Action::Quit => app.should_quit = true,
        Action::MoveDown => app.move_down(),
        Action::MoveUp => app.move_up(),
        Action::PageDown => app.page_down(),
        Action::PageUp => app.page_up(),
        Action::ShiftUp => app.shift_selected(-1),
        Action::ShiftDown => app.shift_selected(1),
        Action::ShiftPrevPage => app.shift_selected_page(-1),
        Action::ShiftNextPage => app.shift_selected_page(1),
        Action::SaveOrder => {
            if !app.order_dirty {
                app.set_status("Order unchanged");
                return;
            }
            let ids = app.product_order();
            match ProductRepository::new(db).reorder(&ids).await {
                Ok(()) => {
                    tracing::info!(count = ids.len(), "Saved product order");
                    reload(app, db, "Order saved").await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to save order");
                    app.set_status(format!("Failed to save order: {}", e));
                }
            }
        }
        Action::Select => {
            app.clear_status();
            app.open_selected();
        }
        Action::Back => app.close_detail(),
        Action::NextImage => app.next_image(now),
        Action::PrevImage => app.prev_image(now),
        Action::HeroNext => app.hero_next(now),
        Action::HeroPrev => app.hero_prev(now),
        Action::Delete => {
            if let Some(id) = app.selected_product().map(|p| p.id) {
                app.mode = Mode::DeleteConfirm(id);
            }
        }
        Action::Confirm => {
            if let Mode::DeleteConfirm(id) = app.mode {
                app.mode = Mode::Normal;
                let deleted = match LocalImageStore::new(&app.config.storage_dir(), &app.config.uploads) {
                    Ok(store) => delete_product(&ProductRepository::new(db), &store, id).await,
                    Err(e) => Err(e),
                };
                match deleted {
                    Ok(Some(_)) => reload(app, db, "Product deleted").await,
                    Ok(None) => app.set_status("Product was already deleted"),
                    Err(e) => {
                        tracing::error!(id, error = %e, "Failed to delete product");
                        app.set_status(format!("Delete failed: {}", e));
                    }
                }
            }
        }
        Action::Cancel | Action::ExitMode => app.mode = Mode::Normal,
        Action::Refresh => {
            let message = if app.order_dirty {
                "Reloaded, unsaved order discarded"
            } else {
                "Reloaded"
            };
            reload(app, db, message).await;
        }
        Action::Help => app.mode = Mode::Help,
        Action::None => {}
    }
}

async fn reload(app: &mut App, db: &Database, message: &str) {
    match load_catalog(app, db).await {
        Ok(()) => app.set_status(message),
        Err(e) => {
            tracing::error!(error = %e, "Failed to reload catalog");
            app.set_status(format!("Reload failed: {}", e));
        }
    }
}
