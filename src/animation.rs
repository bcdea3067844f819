pub(crate) mod clock;
pub(crate) mod driver;
pub(crate) mod keyframes;
pub(crate) mod oscillate;
pub(crate) mod timers;
