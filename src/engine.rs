use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;

use crate::{
    animation::clock::Clock,
    animation::driver::{AnimationDriver, DriverStats, FrameStatus},
    assets::probe::{AssumeAvailable, FsProbe, SourceProbe},
    composition::compositor::compose,
    composition::model::Composition,
    composition::recipe::{ColorTheme, Recipe, RecipeId},
    config::EngineConfig,
    foundation::core::ImageRef,
    render::style::{FrameSnapshot, LayerStyle, render_styles},
    room::perspective::PerspectiveRoom,
    select::selector::EffectVariantSelector,
};

/// One mounted glitch effect over one image.
///
/// The engine owns the recipe selector, the live composition and its
/// animation driver. Any change of image, theme or regenerate counter tears
/// the live composition down completely and builds a new one; nothing is
/// patched in place. All operations are infallible: an absent image simply
/// means there is nothing to show.
pub struct GlitchEngine<C: Clock> {
    config: EngineConfig,
    clock: C,
    rng: StdRng,
    probe: Box<dyn SourceProbe>,
    selector: EffectVariantSelector,
    theme: ColorTheme,
    image: Option<ImageRef>,
    regenerate: u64,
    mounted: bool,
    driver: Option<AnimationDriver>,
    retired: DriverStats,
    rebuilds: u64,
}

impl<C: Clock> GlitchEngine<C> {
    pub fn new(config: EngineConfig, clock: C) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let probe: Box<dyn SourceProbe> = match &config.asset_root {
            Some(root) => Box::new(FsProbe::new(root.clone())),
            None => Box::new(AssumeAvailable),
        };
        Self {
            selector: EffectVariantSelector::new(config.recipes.iter().copied()),
            theme: config.theme,
            config,
            clock,
            rng,
            probe,
            image: None,
            regenerate: 0,
            mounted: false,
            driver: None,
            retired: DriverStats::default(),
            rebuilds: 0,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn image(&self) -> Option<&ImageRef> {
        self.image.as_ref()
    }

    pub fn theme(&self) -> ColorTheme {
        self.theme
    }

    pub fn current_recipe(&self) -> Option<RecipeId> {
        self.selector.current()
    }

    /// Number of compositions built so far.
    pub fn rebuilds(&self) -> u64 {
        self.rebuilds
    }

    /// Attach to the host and start animating if an image is present.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        debug!("engine mounted");
        self.rebuild();
    }

    /// Stop animating and drop the live composition.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.teardown();
        self.mounted = false;
        debug!("engine unmounted");
    }

    /// Swap the focal image. Blank references count as absent.
    pub fn set_image(&mut self, image: Option<ImageRef>) {
        let image = image.filter(|i| !i.is_blank());
        if image == self.image {
            return;
        }
        debug!(image = ?image.as_ref().map(ImageRef::as_str), "image changed");
        self.image = image;
        self.rebuild();
    }

    pub fn set_theme(&mut self, theme: ColorTheme) {
        if theme == self.theme {
            return;
        }
        debug!(%theme, "theme changed");
        self.theme = theme;
        self.rebuild();
    }

    /// Follow the host's regenerate counter.
    ///
    /// `0` means "first render" and draws any recipe; every other change
    /// draws a recipe different from the current one.
    pub fn set_regenerate(&mut self, counter: u64) {
        if counter == self.regenerate {
            return;
        }
        self.regenerate = counter;
        if counter == 0 {
            self.selector.initialize(&mut self.rng);
        } else {
            self.selector.regenerate(&mut self.rng);
        }
        self.rebuild();
    }

    /// Run one animation tick at the clock's current time.
    pub fn frame(&mut self) -> FrameStatus {
        let now = self.clock.now_secs();
        match &mut self.driver {
            Some(d) => d.frame(now),
            None => FrameStatus::Stopped,
        }
    }

    /// Apply flash reverts that are due at the clock's current time.
    pub fn fire_timers(&mut self) -> usize {
        let now = self.clock.now_secs();
        self.driver.as_mut().map_or(0, |d| d.fire_due(now))
    }

    pub fn next_deadline(&self) -> Option<f64> {
        self.driver.as_ref().and_then(AnimationDriver::next_deadline)
    }

    pub fn composition(&self) -> Option<&Composition> {
        self.driver.as_ref().map(AnimationDriver::composition)
    }

    /// Styles of the live composition in painter order; empty when idle.
    pub fn styles(&self) -> Vec<LayerStyle> {
        self.composition().map(render_styles).unwrap_or_default()
    }

    pub fn snapshot(&self) -> Option<FrameSnapshot> {
        let now = self.clock.now_secs();
        self.composition().map(|c| FrameSnapshot::capture(c, now))
    }

    /// Statistics of the live driver, if any.
    pub fn stats(&self) -> Option<DriverStats> {
        self.driver.as_ref().map(AnimationDriver::stats)
    }

    /// Totals over every driver this engine has retired.
    pub fn retired_stats(&self) -> DriverStats {
        self.retired
    }

    /// A perspective room over the current image, using the configured tunables.
    pub fn room(&self, text: Option<&str>) -> Option<PerspectiveRoom> {
        let image = self.image.clone()?;
        Some(PerspectiveRoom::new(self.config.room.clone(), image, text))
    }

    fn teardown(&mut self) {
        let Some(mut driver) = self.driver.take() else {
            return;
        };
        driver.stop();
        let s = driver.stats();
        self.retired.frames += s.frames;
        self.retired.mutations += s.mutations;
        self.retired.reverts_fired += s.reverts_fired;
        self.retired.reverts_discarded += s.reverts_discarded;
        debug!(
            recipe = %driver.composition().recipe_id(),
            frames = s.frames,
            discarded = s.reverts_discarded,
            "composition torn down"
        );
    }

    fn rebuild(&mut self) {
        self.teardown();
        if !self.mounted {
            return;
        }
        let Some(image) = self.image.clone() else {
            debug!("no image; nothing to build");
            return;
        };
        let recipe_id = match self.selector.current() {
            Some(r) => r,
            None => match self.selector.initialize(&mut self.rng) {
                Some(r) => r,
                None => return,
            },
        };

        let recipe = Recipe::new(recipe_id, self.theme);
        let comp = compose(&image, recipe, self.theme, &mut self.rng, self.probe.as_ref());
        let mut driver = AnimationDriver::new(comp, StdRng::from_rng(&mut self.rng));
        driver.start(self.clock.now_secs());
        self.rebuilds += 1;
        debug!(recipe = %recipe_id, rebuilds = self.rebuilds, "composition rebuilt");
        self.driver = Some(driver);
    }
}

#[cfg(test)]
#[path = "../tests/unit/engine.rs"]
mod tests;
