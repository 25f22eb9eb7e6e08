//! 可取消的定时任务
//!
//! 任务按分组登记，切换屏幕时整组取消。时间为会话开始后的毫秒数，
//! 由调用方显式传入，测试可以驱动虚拟时钟。

/// 会话内的毫秒时间戳
pub type Millis = u64;

/// 任务所属分组，通常对应一个屏幕
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaskGroup {
    /// 问题屏：延迟庆祝、闲置提示
    Question,
    /// "NO" 按钮的躲避移动
    Evasion,
    /// 庆祝屏：评分提示
    Celebration,
    /// 秘密模式：打字机
    Secret,
}

/// 到期后要执行的动作
#[derive(Debug, Clone, PartialEq)]
pub enum Task {
    RevealCelebration,
    MoveDecline,
    RotateTeaser,
    ShowRating(usize),
    RestoreRating,
    StartTypewriter,
    TypeNextChar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(u64);

#[derive(Debug, Clone)]
struct Entry {
    id: TaskId,
    group: TaskGroup,
    due: Millis,
    period: Option<Millis>,
    task: Task,
}

#[derive(Debug, Default)]
pub struct Scheduler {
    next_id: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一次性任务，`delay` 毫秒后到期
    pub fn after(&mut self, now: Millis, delay: Millis, group: TaskGroup, task: Task) -> TaskId {
        self.push(now + delay, None, group, task)
    }

    /// 登记周期任务：首次在 `first` 毫秒后，之后每 `period` 毫秒一次
    pub fn every(
        &mut self,
        now: Millis,
        first: Millis,
        period: Millis,
        group: TaskGroup,
        task: Task,
    ) -> TaskId {
        self.push(now + first, Some(period.max(1)), group, task)
    }

    fn push(
        &mut self,
        due: Millis,
        period: Option<Millis>,
        group: TaskGroup,
        task: Task,
    ) -> TaskId {
        let id = TaskId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            group,
            due,
            period,
            task,
        });
        id
    }

    /// 取消整组任务，重复调用无副作用
    pub fn cancel_group(&mut self, group: TaskGroup) -> usize {
        let before = self.entries.len();
        self.entries.retain(|e| e.group != group);
        before - self.entries.len()
    }

    #[cfg(test)]
    pub fn pending(&self, group: TaskGroup) -> usize {
        self.entries.iter().filter(|e| e.group == group).count()
    }

    /// 组内是否已有同一任务在等待
    pub fn is_scheduled(&self, group: TaskGroup, task: &Task) -> bool {
        self.entries
            .iter()
            .any(|e| e.group == group && &e.task == task)
    }

    /// 取出最早到期的任务（同一时刻按登记顺序）。
    /// 周期任务原地顺延一个周期。
    pub fn pop_due(&mut self, now: Millis) -> Option<(Millis, Task)> {
        let index = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(_, e)| (e.due, e.id))
            .map(|(i, _)| i)?;

        let entry = &mut self.entries[index];
        let due = entry.due;
        match entry.period {
            Some(period) => {
                entry.due += period;
                Some((due, entry.task.clone()))
            }
            None => {
                let entry = self.entries.swap_remove(index);
                Some((due, entry.task))
            }
        }
    }
}
