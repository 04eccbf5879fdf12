// This module contains the definition of `Axes`.
pub mod axes;

// This module contains the definition of `Figure`.
pub mod figure;

// This module contains the definition of `PyPlot`.
pub mod pyplot;
