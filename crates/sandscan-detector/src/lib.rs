/*!
 * Sandscan Detector
 *
 * Motor de detecção de sandwich attacks: normaliza a sequência de transações
 * classificadas, procura janelas front-run / vítima / back-run, resolve
 * candidatos sobrepostos e monta o resultado da análise.
 */

mod options;
mod normalizer;
mod candidate;
mod pattern_matcher;
mod deduplicator;
mod result_assembler;
mod detector;
mod classifier;
mod ingest;

pub use options::*;
pub use normalizer::*;
pub use candidate::*;
pub use pattern_matcher::*;
pub use deduplicator::*;
pub use result_assembler::*;
pub use detector::*;
pub use classifier::*;
pub use ingest::*;
