//! Headless front end for the exam-timetabling optimizer: CSV record import,
//! solver gateway (traditional and hybrid simulated annealing, run strictly
//! in sequence), schedule assembly, convergence-chart rendering, and CSV/PDF
//! export. The optimization algorithm itself lives behind the HTTP boundary.

pub mod assemble;
pub mod chart;
pub mod display;
pub mod error;
pub mod export;
pub mod gateway;
pub mod importer;
pub mod records;
pub mod state;
