//! 随机参数来源
//!
//! 所有随机效果都经过 `RandomSource`，测试中可替换为固定序列

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource {
    /// 返回 [0, 1) 内的均匀随机数
    fn next_f64(&mut self) -> f64;

    /// [lo, hi) 内的均匀随机数
    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + self.next_f64() * (hi - lo)
    }

    /// [0, len) 内的下标，`len` 为 0 时返回 0
    fn index(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        ((self.next_f64() * len as f64) as usize).min(len - 1)
    }

    /// 以概率 `p` 返回 true
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

/// 从切片中随机挑一个元素
pub fn pick<'a, T>(rng: &mut dyn RandomSource, items: &'a [T]) -> &'a T {
    &items[rng.index(items.len())]
}

/// 基于 `StdRng` 的默认实现
pub struct SystemRandom(StdRng);

impl SystemRandom {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

impl RandomSource for SystemRandom {
    fn next_f64(&mut self) -> f64 {
        self.0.gen_range(0.0..1.0)
    }
}

/// 按固定序列循环返回的随机源
#[cfg(test)]
pub struct ScriptedRandom {
    values: Vec<f64>,
    cursor: usize,
}

#[cfg(test)]
impl ScriptedRandom {
    pub fn new(values: &[f64]) -> Self {
        Self {
            values: values.to_vec(),
            cursor: 0,
        }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(&[value])
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_f64(&mut self) -> f64 {
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value
    }
}
