use crate::coach::Persona;
use crate::models::TodayResponse;
use crate::scoring::{SleepDuration, SleepQuality, WakeRoutine, WakeTime, EXERCISE_STEP_MINUTES, WATER_GOAL};
use crate::session::CheckinStatus;

pub fn render_index(view: &TodayResponse) -> String {
    let status = match view.status {
        CheckinStatus::Open => "진행 중 (임시 점수)",
        CheckinStatus::Closed => "체크인 완료",
    };
    INDEX_HTML
        .replace("{{DATE}}", &view.date)
        .replace("{{STATUS}}", status)
        .replace("{{TOTAL}}", &view.total_score.to_string())
        .replace("{{CATALOG}}", &catalog_json())
}

fn catalog_json() -> String {
    serde_json::json!({
        "water_goal": WATER_GOAL,
        "exercise_step": EXERCISE_STEP_MINUTES,
        "sleep_durations": SleepDuration::ALL.map(SleepDuration::label),
        "sleep_qualities": SleepQuality::ALL.map(SleepQuality::label),
        "wake_times": WakeTime::ALL.map(WakeTime::label),
        "routines": WakeRoutine::ALL.map(WakeRoutine::label),
        "personas": Persona::ALL.map(|p| serde_json::json!({ "id": p, "label": p.label() })),
    })
    .to_string()
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ko">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>AI 습관 트래커</title>
  <style>
    :root {
      --bg-1: #f3f6ee;
      --bg-2: #cfe6c8;
      --ink: #23302a;
      --accent: #3c8d5a;
      --accent-2: #2f4858;
      --muted: #6f7b72;
      --card: rgba(255, 255, 255, 0.9);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eaf4e4 60%, #f7faf4 100%);
      color: var(--ink);
      font-family: "Pretendard", "Apple SD Gothic Neo", "Noto Sans KR", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(960px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 24px;
    }

    h1 { margin: 0; font-size: clamp(1.8rem, 4vw, 2.4rem); }
    h2 { margin: 0 0 12px; font-size: 1.1rem; color: var(--accent-2); }
    .subtitle { margin: 4px 0 0; color: var(--muted); }

    .grid {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(260px, 1fr));
      gap: 16px;
    }

    .card {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
      align-content: start;
    }

    .score { font-size: 2.6rem; font-weight: 700; color: var(--accent); }
    .row { display: flex; gap: 8px; align-items: center; flex-wrap: wrap; }
    .label { font-size: 0.85rem; color: var(--muted); }

    button, select, input, textarea {
      font: inherit;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.18);
      padding: 8px 12px;
      background: white;
    }

    button { cursor: pointer; }
    button.primary { background: var(--accent); color: white; border: none; font-weight: 600; }
    button:disabled, select:disabled, input:disabled, textarea:disabled { opacity: 0.55; cursor: not-allowed; }

    ul { margin: 0; padding-left: 20px; }
    .bars { display: grid; grid-template-columns: repeat(7, 1fr); gap: 8px; align-items: end; height: 180px; }
    .bar { background: var(--accent); border-radius: 8px 8px 0 0; min-height: 2px; }
    .bar.empty { background: rgba(47, 72, 88, 0.12); }
    .bar-labels { display: grid; grid-template-columns: repeat(7, 1fr); gap: 8px; text-align: center; font-size: 0.8rem; color: var(--muted); }
    pre { white-space: pre-wrap; background: #f6f8f5; border-radius: 12px; padding: 12px; margin: 0; }
    .status { min-height: 1.2em; color: var(--muted); }
    .status.error { color: #b3261e; }
    img.dog { max-width: 100%; border-radius: 12px; }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>📊 AI 습관 트래커</h1>
      <p class="subtitle"><span id="date">{{DATE}}</span> · <span id="state">{{STATUS}}</span></p>
    </header>

    <section class="grid">
      <div class="card">
        <span class="label">오늘 점수</span>
        <span class="score"><span id="total">{{TOTAL}}</span>/100</span>
        <span class="label" id="achievement"></span>
        <ul id="categories"></ul>
      </div>
      <div class="card">
        <h2>피드백</h2>
        <div id="feedback"></div>
      </div>
    </section>

    <section class="grid" id="controls">
      <div class="card">
        <h2>💧 물</h2>
        <div class="row">
          <input id="water" type="range" min="0" max="8" value="0" />
          <span id="water-value"></span>
        </div>
        <h2>🏃 운동</h2>
        <div class="row">
          <button data-action="add_exercise">+ 분</button>
          <button data-action="reset_exercise">초기화</button>
          <span id="exercise-value"></span>
        </div>
        <h2>📚 공부</h2>
        <div class="row">
          <button data-action="add_study">+ 집중 1세트</button>
          <button data-action="reset_study">초기화</button>
          <span id="study-value"></span>
        </div>
      </div>
      <div class="card">
        <h2>😴 수면</h2>
        <div class="row">
          <select id="sleep-duration"></select>
          <select id="sleep-quality"></select>
        </div>
        <h2>⏰ 기상</h2>
        <label class="row"><input id="wake-success" type="checkbox" /> 알람 한 번에 기상 성공</label>
        <select id="wake-time"></select>
        <div class="row" id="routines"></div>
      </div>
      <div class="card">
        <h2>🙂 기분 · 메모</h2>
        <div class="row">
          <input id="mood" type="range" min="1" max="10" value="6" />
          <span id="mood-value"></span>
        </div>
        <textarea id="note" rows="3" placeholder="오늘 한 줄 메모"></textarea>
        <button class="primary" id="checkin">✅ 오늘 체크인 완료</button>
      </div>
    </section>

    <section class="card">
      <h2>📈 최근 7일 점수</h2>
      <div class="bars" id="bars"></div>
      <div class="bar-labels" id="bar-labels"></div>
    </section>

    <section class="card">
      <h2>🧠 AI 코치 리포트</h2>
      <div class="row">
        <select id="persona"></select>
        <input id="city" placeholder="도시 (예: Seoul)" />
        <button class="primary" id="report-btn">리포트 생성</button>
        <a id="calendar" href="/api/calendar.ics">📅 캘린더로 내보내기</a>
      </div>
      <div class="grid">
        <div id="weather"></div>
        <div id="dog"></div>
      </div>
      <pre id="report"></pre>
      <pre id="share"></pre>
    </section>

    <section class="card">
      <h2>💬 코치에게 묻기</h2>
      <div class="row">
        <input id="chat-message" placeholder="오늘 기록에 대해 코치에게 물어보세요" />
        <button class="primary" id="chat-btn">보내기</button>
      </div>
      <pre id="chat-reply"></pre>
    </section>

    <p class="status" id="status"></p>
  </main>

  <script>
    const catalog = {{CATALOG}};
    const names = { water: '💧 물', exercise: '🏃 운동', study: '📚 공부', sleep: '😴 수면', wake: '⏰ 기상' };
    const $ = (id) => document.getElementById(id);
    let today = null;

    const setStatus = (message, kind) => {
      $('status').textContent = message;
      $('status').className = `status ${kind || ''}`;
    };

    const paragraph = (text) => {
      const p = document.createElement('p');
      p.textContent = text;
      return p;
    };

    const fillSelect = (el, options) => {
      el.innerHTML = '';
      options.forEach((opt) => {
        const option = document.createElement('option');
        option.value = typeof opt === 'string' ? opt : opt.id;
        option.textContent = typeof opt === 'string' ? opt : opt.label;
        el.appendChild(option);
      });
    };

    const request = async (method, url, body) => {
      const res = await fetch(url, {
        method,
        headers: body ? { 'content-type': 'application/json' } : {},
        body: body ? JSON.stringify(body) : undefined
      });
      if (!res.ok) {
        throw new Error((await res.text()) || 'Request failed');
      }
      return res.json();
    };

    const render = (view) => {
      today = view;
      const closed = view.status === 'closed';
      const inputs = view.inputs;
      $('date').textContent = view.date;
      $('state').textContent = closed ? '체크인 완료' : '진행 중 (임시 점수)';
      $('total').textContent = view.total_score;
      $('achievement').textContent = `달성률 ${view.achievement}% · 기분 ${inputs.mood}/10`;
      $('categories').innerHTML = Object.keys(names)
        .map((key) => `<li>${names[key]} ${view.scores[key]}/20 ${view.completion[key] ? '✅' : '⬜'}</li>`)
        .join('');

      const fb = view.feedback;
      $('feedback').innerHTML = `
        <p>강점: ${fb.strengths.map((h) => names[h]).join(', ')}</p>
        <p>보완: ${names[fb.weak_point]}</p>
        <ol>${fb.missions.map((m) => `<li>${m}</li>`).join('')}</ol>`;

      $('water').max = catalog.water_goal;
      $('water').value = inputs.water_cups;
      $('water-value').textContent = `${inputs.water_cups}/${catalog.water_goal}잔`;
      $('exercise-value').textContent = `${inputs.exercise_minutes}분`;
      $('study-value').textContent = `${inputs.study_units}세트`;
      $('sleep-duration').value = inputs.sleep_duration;
      $('sleep-quality').value = inputs.sleep_quality;
      $('wake-success').checked = inputs.wake_success;
      $('wake-time').value = inputs.wake_time;
      document.querySelectorAll('#routines input').forEach((box) => {
        box.checked = inputs.wake_routines.includes(box.value);
      });
      $('mood').value = inputs.mood;
      $('mood-value').textContent = `${inputs.mood}/10`;
      if (document.activeElement !== $('note')) {
        $('note').value = inputs.note;
      }

      document.querySelectorAll('#controls button, #controls input, #controls select, #controls textarea')
        .forEach((el) => { el.disabled = closed; });
      $('report-btn').disabled = !closed;
      $('chat-btn').disabled = !closed;
      $('calendar').style.visibility = closed ? 'visible' : 'hidden';
    };

    const renderStats = (stats) => {
      $('bars').innerHTML = stats.last_7_days
        .map((day) => day.total_score === null
          ? '<div class="bar empty" style="height:2px"></div>'
          : `<div class="bar" style="height:${day.total_score}%" title="${day.date}: ${day.total_score}점, 기분 ${day.mood}"></div>`)
        .join('');
      $('bar-labels').innerHTML = stats.last_7_days
        .map((day) => `<span>${day.date.slice(5)}</span>`)
        .join('');
    };

    const send = async (command) => {
      try {
        render(await request('POST', '/api/inputs', command));
        setStatus('', '');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    const refresh = async () => {
      const [view, stats] = await Promise.all([request('GET', '/api/today'), request('GET', '/api/stats')]);
      render(view);
      renderStats(stats);
    };

    fillSelect($('sleep-duration'), catalog.sleep_durations);
    fillSelect($('sleep-quality'), catalog.sleep_qualities);
    fillSelect($('wake-time'), catalog.wake_times);
    fillSelect($('persona'), catalog.personas);
    $('persona').value = 'mentor';
    $('routines').innerHTML = catalog.routines
      .map((r) => `<label><input type="checkbox" value="${r}" /> ${r}</label>`)
      .join('');

    document.querySelectorAll('button[data-action]').forEach((btn) => {
      btn.addEventListener('click', () => send({ action: btn.dataset.action }));
    });
    $('water').addEventListener('change', (e) => send({ action: 'set_water', cups: Number(e.target.value) }));
    $('sleep-duration').addEventListener('change', (e) => send({ action: 'set_sleep_duration', value: e.target.value }));
    $('sleep-quality').addEventListener('change', (e) => send({ action: 'set_sleep_quality', value: e.target.value }));
    $('wake-success').addEventListener('change', (e) => send({ action: 'set_wake_success', value: e.target.checked }));
    $('wake-time').addEventListener('change', (e) => send({ action: 'set_wake_time', value: e.target.value }));
    $('routines').addEventListener('change', (e) => send({ action: 'toggle_routine', routine: e.target.value }));
    $('mood').addEventListener('change', (e) => send({ action: 'set_mood', value: Number(e.target.value) }));
    $('note').addEventListener('change', (e) => send({ action: 'set_note', text: e.target.value }));

    $('checkin').addEventListener('click', async () => {
      try {
        render(await request('POST', '/api/checkin'));
        renderStats(await request('GET', '/api/stats'));
        setStatus('체크인 완료!', '');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    $('report-btn').addEventListener('click', async () => {
      setStatus('날씨/강아지/리포트 불러오는 중...', '');
      try {
        const body = { persona: $('persona').value };
        if ($('city').value.trim()) {
          body.city = $('city').value.trim();
        }
        const result = await request('POST', '/api/report', body);
        const w = result.weather;
        $('weather').replaceChildren(...(w
          ? [
              paragraph(`🌦️ ${w.city} · ${w.description}`),
              paragraph(`🌡️ ${w.temp_c.toFixed(1)}°C (체감 ${w.feels_like_c.toFixed(1)}°C)`),
              paragraph(`💧 습도 ${w.humidity}% · 🌬️ ${w.wind_ms.toFixed(1)}m/s`),
            ]
          : [paragraph('날씨 정보를 불러오지 못했어요.')]));
        if (result.dog) {
          const img = document.createElement('img');
          img.className = 'dog';
          img.alt = 'dog';
          img.src = result.dog.image_url;
          $('dog').replaceChildren(paragraph(`🐶 품종: ${result.dog.breed}`), img);
        } else {
          $('dog').replaceChildren(paragraph('강아지 정보를 불러오지 못했어요.'));
        }
        $('report').textContent = result.report;
        $('share').textContent = result.share_text;
        setStatus('', '');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    $('chat-btn').addEventListener('click', async () => {
      const message = $('chat-message').value.trim();
      if (!message) {
        return;
      }
      try {
        const result = await request('POST', '/api/chat', { persona: $('persona').value, message });
        $('chat-reply').textContent = result.reply;
        setStatus('', '');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    refresh().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;
