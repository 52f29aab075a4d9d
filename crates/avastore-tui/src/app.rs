use std::sync::Arc;
use std::time::{Duration, Instant};

use avastore_core::catalog::{
    classify_swipe, ordering, select_whitelisted, Gallery, HeroRotation, Product, ProductSummary,
};
use avastore_core::AppConfig;
use crossterm::event::{MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::theme::Theme;
use crate::transition::SlideAnimator;
use crate::viewport::{CarouselHost, CELL_WIDTH_PX};

/// Current focus panel in the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Dashboard,
    ProductDetail,
}

/// Application mode
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// Waiting for y/n before deleting the product with this id
    DeleteConfirm(i64),
    Help,
}

/// Screen regions computed once per draw
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AppLayout {
    pub hero: Rect,
    pub logos: Rect,
    pub main: Rect,
    pub sidebar: Rect,
    pub professionals: Rect,
    pub status: Rect,
}

/// Open product with its image gallery
#[derive(Debug)]
pub struct DetailState {
    pub product: Product,
    pub gallery: Gallery,
    pub slide: SlideAnimator,
    drag_origin: Option<u16>,
}

impl DetailState {
    fn new(product: Product, slide: SlideAnimator) -> Self {
        let gallery = Gallery::new(product.images.clone());
        Self {
            product,
            gallery,
            slide,
            drag_origin: None,
        }
    }
}

/// Application state
pub struct App {
    pub config: Arc<AppConfig>,
    pub theme: Theme,
    pub focus: Focus,
    pub mode: Mode,
    pub should_quit: bool,
    pub status_message: Option<String>,
    /// Products in admin order (possibly with unsaved moves)
    pub products: Vec<Product>,
    pub selected: usize,
    /// Order changed locally and not yet saved
    pub order_dirty: bool,
    pub logos: CarouselHost<String>,
    pub professionals: CarouselHost<String>,
    pub sidebar: CarouselHost<ProductSummary>,
    pub featured: Arc<[ProductSummary]>,
    pub hero: HeroRotation,
    pub detail: Option<DetailState>,
    pub layout: AppLayout,
}

impl App {
    pub fn new(config: Arc<AppConfig>, theme: Theme) -> Self {
        let mut logos: CarouselHost<String> =
            CarouselHost::new("logos", config.carousels.logos.clone());
        let mut professionals: CarouselHost<String> =
            CarouselHost::new("professionals", config.carousels.professionals.clone());
        let mut sidebar: CarouselHost<ProductSummary> =
            CarouselHost::new("sidebar", config.carousels.sidebar.clone());
        logos.mount(Arc::from(Vec::new()));
        professionals.mount(Arc::from(Vec::new()));
        sidebar.mount(Arc::from(Vec::new()));

        let hero = Self::hero_for(&config, 0);

        Self {
            config,
            theme,
            focus: Focus::Dashboard,
            mode: Mode::Normal,
            should_quit: false,
            status_message: None,
            products: Vec::new(),
            selected: 0,
            order_dirty: false,
            logos,
            professionals,
            sidebar,
            featured: Arc::from(Vec::new()),
            hero,
            detail: None,
            layout: AppLayout::default(),
        }
    }

    fn hero_for(config: &AppConfig, len: usize) -> HeroRotation {
        HeroRotation::new(
            len,
            Duration::from_secs(config.gallery.hero_interval_secs),
            Duration::from_secs(config.gallery.hero_resume_secs),
        )
    }

    /// Replace the catalog after a (re)load
    pub fn set_products(&mut self, products: Vec<Product>) {
        let selected_id = self.selected_product().map(|p| p.id);
        self.products = products;
        self.order_dirty = false;
        self.selected = selected_id
            .and_then(|id| self.products.iter().position(|p| p.id == id))
            .unwrap_or(0)
            .min(self.products.len().saturating_sub(1));

        let fallback = self.config.catalog.fallback_image.as_str();
        let featured: Vec<ProductSummary> =
            select_whitelisted(&self.products, &self.config.catalog.sidebar_whitelist)
                .into_iter()
                .map(|product| product.summary(fallback))
                .collect();

        if featured != *self.featured {
            self.featured = Arc::from(featured);
            self.sidebar.set_items(self.featured.clone());
            self.hero = Self::hero_for(&self.config, self.featured.len());
        }

        if let Some(detail) = self.detail.as_ref() {
            let id = detail.product.id;
            match self.products.iter().find(|p| p.id == id).cloned() {
                Some(product) => self.open_product(product),
                None => self.close_detail(),
            }
        }
    }

    pub fn set_logos(&mut self, logos: Vec<String>) {
        self.logos.set_items(Arc::from(logos));
    }

    pub fn set_professionals(&mut self, images: Vec<String>) {
        self.professionals.set_items(Arc::from(images));
    }

    pub fn selected_product(&self) -> Option<&Product> {
        self.products.get(self.selected)
    }

    pub fn page_size(&self) -> usize {
        self.config.catalog.page_size.max(1)
    }

    /// 1-based page of the selection and the page count
    pub fn page_position(&self) -> (usize, usize) {
        let size = self.page_size();
        (
            ordering::page_of(self.selected, size),
            ordering::page_count(self.products.len(), size).max(1),
        )
    }

    /// Whether the loop should run at animation frame rate
    pub fn is_animating(&self) -> bool {
        self.logos.is_scheduled()
            || self.professionals.is_scheduled()
            || self.sidebar.is_scheduled()
            || self.detail.as_ref().is_some_and(|d| d.slide.is_animating())
    }

    /// Advance every animation to `now`
    pub fn frame(&mut self, now: Instant) {
        self.logos.frame(now);
        self.professionals.frame(now);
        self.sidebar.frame(now);
        self.hero.tick(now);
        if let Some(detail) = self.detail.as_mut() {
            detail.slide.update(now);
        }
    }

    /// Split the screen and hand each carousel its region
    pub fn layout(&mut self, area: Rect) -> AppLayout {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(3),
                Constraint::Length(1),
            ])
            .split(area);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(20), Constraint::Length(34)])
            .split(rows[2]);

        let layout = AppLayout {
            hero: rows[0],
            logos: self.logos.constrain(inner(rows[1])),
            main: columns[0],
            sidebar: self.sidebar.constrain(inner(columns[1])),
            professionals: self.professionals.constrain(inner(rows[3])),
            status: rows[4],
        };

        self.logos.layout(layout.logos);
        self.sidebar.layout(layout.sidebar);
        self.professionals.layout(layout.professionals);
        self.layout = layout;
        layout
    }

    pub fn move_down(&mut self) {
        if !self.products.is_empty() && self.selected < self.products.len() - 1 {
            self.selected += 1;
        }
    }

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        if !self.products.is_empty() {
            self.selected = (self.selected + self.page_size()).min(self.products.len() - 1);
        }
    }

    pub fn page_up(&mut self) {
        self.selected = self.selected.saturating_sub(self.page_size());
    }

    /// Move the selected product one slot earlier (-1) or later (+1)
    pub fn shift_selected(&mut self, delta: isize) {
        let Some(target) = self.selected.checked_add_signed(delta) else {
            return;
        };
        if ordering::move_to_index(&mut self.products, self.selected, target) {
            self.selected = target.min(self.products.len() - 1);
            self.order_dirty = true;
        }
    }

    /// Move the selected product to the first slot of the previous (-1) or next (+1) page
    pub fn shift_selected_page(&mut self, delta: isize) {
        let Some(id) = self.selected_product().map(|p| p.id) else {
            return;
        };
        let (page, pages) = self.page_position();
        let target = page.saturating_add_signed(delta).clamp(1, pages);
        let size = self.page_size();

        if ordering::move_to_page_start(&mut self.products, &id, target, size, |p| p.id) {
            self.order_dirty = true;
        }
        if let Some(index) = self.products.iter().position(|p| p.id == id) {
            self.selected = index;
        }
    }

    /// Product ids in the current on-screen order
    pub fn product_order(&self) -> Vec<i64> {
        self.products.iter().map(|p| p.id).collect()
    }

    pub fn open_selected(&mut self) {
        if let Some(product) = self.selected_product().cloned() {
            self.open_product(product);
        }
    }

    fn open_product(&mut self, product: Product) {
        let keep_index = self
            .detail
            .as_ref()
            .filter(|d| d.product.id == product.id)
            .map(|d| d.gallery.index());

        let mut detail = DetailState::new(product, SlideAnimator::new(&self.config.gallery));
        if let Some(index) = keep_index {
            detail.gallery.select(index);
        }
        self.detail = Some(detail);
        self.focus = Focus::ProductDetail;
    }

    pub fn close_detail(&mut self) {
        self.detail = None;
        self.focus = Focus::Dashboard;
    }

    pub fn next_image(&mut self, now: Instant) {
        let width = self.layout.main.width as f64;
        if let Some(detail) = self.detail.as_mut() {
            if detail.gallery.len() > 1 {
                detail.gallery.next();
                detail.slide.start(width, now);
            }
        }
    }

    pub fn prev_image(&mut self, now: Instant) {
        let width = self.layout.main.width as f64;
        if let Some(detail) = self.detail.as_mut() {
            if detail.gallery.len() > 1 {
                detail.gallery.prev();
                detail.slide.start(-width, now);
            }
        }
    }

    pub fn hero_next(&mut self, now: Instant) {
        self.hero.next(now);
    }

    pub fn hero_prev(&mut self, now: Instant) {
        self.hero.prev(now);
    }

    /// Route mouse input to the carousels and the gallery
    pub fn handle_mouse(&mut self, event: &MouseEvent, now: Instant) {
        self.logos.handle_mouse(event);
        self.professionals.handle_mouse(event);
        self.sidebar.handle_mouse(event);

        let main = self.layout.main;
        let width = main.width as f64;
        let min_swipe = self.config.gallery.min_swipe_px;
        let Some(detail) = self.detail.as_mut() else {
            return;
        };

        match event.kind {
            MouseEventKind::Down(MouseButton::Left) if contains(main, event.column, event.row) => {
                detail.drag_origin = Some(event.column);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(origin) = detail.drag_origin.take() {
                    let offset_px = (event.column as f64 - origin as f64) * CELL_WIDTH_PX;
                    let action = classify_swipe(offset_px, min_swipe);
                    if detail.gallery.apply_swipe(action) {
                        let from = if offset_px > 0.0 { -width } else { width };
                        detail.slide.start(from, now);
                    }
                }
            }
            _ => {}
        }
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some(message.into());
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

/// Area inside a one-cell border
fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use crossterm::event::KeyModifiers;

    fn product(id: i64, name: &str, images: usize) -> Product {
        let now = Utc::now();
        Product {
            id,
            name: name.to_string(),
            price: format!("{id}0 €"),
            description_1: Some(format!("{name} description")),
            description_2: None,
            description_3: None,
            images: (0..images).map(|i| format!("/img/{id}-{i}.png")).collect(),
            position: id,
            created_at: now,
            updated_at: now,
        }
    }

    fn app_with(count: i64) -> App {
        let mut config = AppConfig::default();
        config.catalog.page_size = 4;
        let mut app = App::new(Arc::new(config), Theme::default());
        app.set_products((1..=count).map(|id| product(id, &format!("P{id}"), 2)).collect());
        app
    }

    #[test]
    fn test_empty_carousels_are_idle() {
        let app = App::new(Arc::new(AppConfig::default()), Theme::default());
        assert!(!app.is_animating());
        assert!(app.logos.carousel().is_placeholder());
    }

    #[test]
    fn test_featured_products_follow_whitelist() {
        let mut app = App::new(Arc::new(AppConfig::default()), Theme::default());
        app.set_products(vec![
            product(1, "warm pro", 0),
            product(2, "Other", 1),
            product(3, "Cryo Sport", 1),
        ]);

        let names: Vec<&str> = app.featured.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Cryo Sport", "warm pro"]);
        assert_eq!(app.featured[1].thumbnail, "/images/services/hero1.png");
        assert!(app.sidebar.is_scheduled());
        assert_eq!(app.hero.len(), 2);
    }

    #[test]
    fn test_shift_selected_marks_dirty() {
        let mut app = app_with(5);
        app.shift_selected(1);
        assert_eq!(app.product_order(), vec![2, 1, 3, 4, 5]);
        assert_eq!(app.selected, 1);
        assert!(app.order_dirty);

        app.move_up();
        app.shift_selected(-1);
        assert_eq!(app.product_order(), vec![2, 1, 3, 4, 5]);
    }

    #[test]
    fn test_shift_selected_page() {
        let mut app = app_with(10);
        app.selected = 1;
        app.shift_selected_page(1);
        assert_eq!(app.product_order(), vec![1, 3, 4, 5, 2, 6, 7, 8, 9, 10]);
        assert_eq!(app.selected, 4);
        assert_eq!(app.page_position(), (2, 3));
    }

    #[test]
    fn test_reload_keeps_selection() {
        let mut app = app_with(5);
        app.selected = 3;
        let mut reloaded: Vec<Product> = (1..=5).map(|id| product(id, &format!("P{id}"), 2)).collect();
        reloaded.reverse();
        app.set_products(reloaded);
        assert_eq!(app.selected_product().map(|p| p.id), Some(4));
        assert!(!app.order_dirty);
    }

    #[test]
    fn test_gallery_navigation_starts_slide() {
        let mut app = app_with(2);
        app.layout(Rect::new(0, 0, 100, 40));
        app.open_selected();
        assert_eq!(app.focus, Focus::ProductDetail);

        let now = Instant::now();
        app.next_image(now);
        let detail = app.detail.as_ref().unwrap();
        assert_eq!(detail.gallery.index(), 1);
        assert!(detail.slide.is_animating());
        assert!(app.is_animating());
    }

    #[test]
    fn test_mouse_swipe_changes_image() {
        let mut app = app_with(1);
        let layout = app.layout(Rect::new(0, 0, 100, 40));
        app.open_selected();

        let row = layout.main.y + 2;
        let down = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 40,
            row,
            modifiers: KeyModifiers::NONE,
        };
        let up = MouseEvent {
            kind: MouseEventKind::Up(MouseButton::Left),
            column: 30,
            row,
            modifiers: KeyModifiers::NONE,
        };

        let now = Instant::now();
        app.handle_mouse(&down, now);
        app.handle_mouse(&up, now);

        // 10 cells left = 80px, past the 50px minimum: next image
        assert_eq!(app.detail.as_ref().unwrap().gallery.index(), 1);
    }

    #[test]
    fn test_deleted_product_closes_detail() {
        let mut app = app_with(2);
        app.open_selected();
        app.set_products(vec![product(2, "P2", 1)]);
        assert!(app.detail.is_none());
        assert_eq!(app.focus, Focus::Dashboard);
    }
}
