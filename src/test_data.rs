#[cfg(test)]
pub const VCONTAINER_ARTICLE: &str = "<!--
[TITLE]: # (Understanding VContainer scopes)
[DATE]: # (2022-02-24 10:30:00 +09:00)
[DRAFT]: # (false)
[CATEGORIES]: # (unity csharp)
[TAGS]: # (Unity VContainer)
-->

Every `LifetimeScope` owns the objects it resolves, and child scopes inherit
registrations from their parents. Most confusion with VContainer comes from
registering something in the wrong scope.

```csharp
public class GameLifetimeScope : LifetimeScope
{
    protected override void Configure(IContainerBuilder builder)
    {
        builder.Register<IWeaponService, WeaponService>(Lifetime.Singleton);
        builder.RegisterEntryPoint<GamePresenter>();
    }
}
```

A singleton registered in a child scope is a singleton of that child, not of
the whole application. Dispose the scope and the instance goes with it.
";

#[cfg(test)]
pub const UNITASK_ARTICLE: &str = "[TITLE]: # (UniTask basics)
[DATE]: # (2022-02-25 08:00:00 +09:00)
[TAGS]: # (Unity UniTask)

Async code in Unity used to mean coroutines and `yield return`. UniTask gives
us allocation-free async/await that understands the player loop.

```csharp
private async UniTaskVoid LoadTitleScreenAsync(CancellationToken token)
{
    await SceneManager.LoadSceneAsync(\"Title\").ToUniTask(cancellationToken: token);
    await UniTask.Yield(PlayerLoopTiming.Update, token);
}
```

Note the `CancellationToken`: without it the task outlives the scene that
started it.
";

#[cfg(test)]
pub const MESSAGEPIPE_DRAFT: &str = "<!--
[TITLE]: # (MessagePipe as an event bus)
[DATE]: # (2022-03-05 18:15:00 +09:00)
[DRAFT]: # (true)
[CATEGORIES]: # (unity)
[TAGS]: # (Unity MessagePipe)
-->

Draft notes. `IPublisher<T>` / `ISubscriber<T>` pairs replace the usual
C# event spaghetti, but I still need to benchmark the filters.
";

#[cfg(test)]
pub const SCALA_NOTES: &str = "[TITLE]: # (Pattern matching notes)
[DATE]: # (2022-01-10 21:00:00 +01:00)
[CATEGORIES]: # (jvm)
[TAGS]: # (Scala)

Coming from C#'s `switch` expressions, Scala's `match` feels familiar until
extractors show up.

```scala
def describe(shape: Shape): String = shape match {
  case Circle(r) if r > 10 => \"big circle\"
  case Circle(_)           => \"circle\"
  case Rect(w, h)          => s\"rect ${w}x${h}\"
}
```
";
