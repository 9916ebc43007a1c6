//! Базовые компоненты акторов: Actor, Health, Mana

use bevy::prelude::*;

/// Актор (игрок, враг) — именованное живое существо
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
pub struct Actor {
    /// Имя для логов и демо-вывода
    pub name: String,
}

impl Actor {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Здоровье актора
///
/// Инвариант: 0 ≤ current ≤ max
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Health {
    pub current: u32,
    pub max: u32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100) // Default 100 HP
    }
}

impl Health {
    pub fn new(max: u32) -> Self {
        Self { current: max, max }
    }

    pub fn is_alive(&self) -> bool {
        self.current > 0
    }

    /// Доля здоровья 0.0..=1.0 (вход eligibility-предикатов AI)
    pub fn ratio(&self) -> f32 {
        self.current as f32 / self.max as f32
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.current = self.current.saturating_sub(amount);
    }

    pub fn heal(&mut self, amount: u32) {
        self.current = (self.current + amount).min(self.max);
    }
}

/// Мана для заклинаний
///
/// Инвариант: 0.0 ≤ current ≤ max
/// Regen: 5 units/sec, только пока персонаж в Idle
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Mana {
    pub current: f32,
    pub max: f32,
    pub regen_rate: f32, // units per second
}

impl Default for Mana {
    fn default() -> Self {
        Self::new(50.0) // Default 50 MP
    }
}

impl Mana {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            max,
            regen_rate: 5.0,
        }
    }

    pub fn can_afford(&self, cost: f32) -> bool {
        self.current >= cost
    }

    pub fn consume(&mut self, cost: f32) -> bool {
        if self.can_afford(cost) {
            self.current -= cost;
            true
        } else {
            false
        }
    }

    pub fn regenerate(&mut self, delta_time: f32) {
        self.current = (self.current + self.regen_rate * delta_time).min(self.max);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_damage() {
        let mut health = Health::new(100);
        assert_eq!(health.current, 100);

        health.take_damage(30);
        assert_eq!(health.current, 70);
        assert!(health.is_alive());

        health.take_damage(100); // Saturating sub
        assert_eq!(health.current, 0);
        assert!(!health.is_alive());
    }

    #[test]
    fn test_health_heal() {
        let mut health = Health::new(100);
        health.take_damage(50);
        assert_eq!(health.current, 50);

        health.heal(30);
        assert_eq!(health.current, 80);

        health.heal(100); // Clamped to max
        assert_eq!(health.current, 100);
    }

    #[test]
    fn test_health_ratio() {
        let mut health = Health::new(100);
        assert_eq!(health.ratio(), 1.0);

        health.take_damage(85);
        assert!((health.ratio() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn test_mana_consume() {
        let mut mana = Mana::new(50.0);

        assert!(mana.consume(10.0));
        assert_eq!(mana.current, 40.0);

        assert!(!mana.consume(45.0)); // Недостаточно
        assert_eq!(mana.current, 40.0); // Не изменилась
    }

    #[test]
    fn test_mana_regenerate() {
        let mut mana = Mana::new(50.0);
        mana.consume(30.0);
        assert_eq!(mana.current, 20.0);

        mana.regenerate(2.0); // 2 sec × 5 units/sec = +10
        assert_eq!(mana.current, 30.0);

        mana.regenerate(10.0); // Clamp to max
        assert_eq!(mana.current, 50.0);
    }
}
